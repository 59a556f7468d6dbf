//! The primitive procedural shapes: single points, rings, filled disks,
//! rays, stars, angular wedges, and skew-corrected rectangles.
//!
//! Every shape here is cheap to construct and infinitely reusable; the
//! actual geometry work happens lazily in [Region::points]. Constructors
//! validate their arguments eagerly and never clamp.

use crate::{
    error::HexError,
    hex::{Direction, HexPoint},
    region::Region,
};
use std::iter;

/// A pull-based walk around one ring of a (possibly partial) hexagon.
///
/// The walk starts at the corner `origin + start * radius`, then travels
/// `radius` steps along each of `sides` successive directions, turning 60°
/// counterclockwise at each corner. The travel direction for the first side
/// is two CCW turns past `start` (that's what makes the path orbit the
/// origin instead of spiraling away). With `sides == 6` and `truncate_last`
/// set, the final side stops one step short so the starting corner isn't
/// yielded twice; that's the full-ring configuration, producing exactly
/// `6 * radius` points. A radius of zero yields the origin alone.
pub(crate) struct RingWalk {
    current: HexPoint,
    radius: i32,
    start_index: usize,
    side: usize,
    step: i32,
    remaining: usize,
    started: bool,
}

impl RingWalk {
    pub(crate) fn new(
        origin: HexPoint,
        radius: i32,
        start: Direction,
        sides: usize,
        truncate_last: bool,
    ) -> Self {
        debug_assert!(radius >= 0, "ring walk radius must be non-negative");
        let remaining = if radius == 0 {
            1
        } else {
            sides * radius as usize + 1 - usize::from(truncate_last)
        };
        Self {
            current: origin + start.to_point() * radius,
            radius,
            start_index: start.ccw_index(),
            side: 0,
            step: 0,
            remaining,
            started: false,
        }
    }
}

impl Iterator for RingWalk {
    type Item = HexPoint;

    fn next(&mut self) -> Option<HexPoint> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        if !self.started {
            self.started = true;
            return Some(self.current);
        }

        if self.step == self.radius {
            self.side += 1;
            self.step = 0;
        }
        let dir = Direction::COUNTER_CLOCKWISE
            [(self.start_index + 2 + self.side) % 6];
        self.current = self.current + dir.to_point();
        self.step += 1;
        Some(self.current)
    }
}

/// The region holding exactly one point.
#[derive(Copy, Clone, Debug)]
pub struct PointRegion {
    point: HexPoint,
}

impl PointRegion {
    pub fn new(point: HexPoint) -> Self {
        Self { point }
    }
}

impl From<HexPoint> for PointRegion {
    fn from(point: HexPoint) -> Self {
        Self::new(point)
    }
}

impl Region for PointRegion {
    fn count(&self) -> Result<usize, HexError> {
        Ok(1)
    }

    fn contains(&self, point: HexPoint) -> Result<bool, HexError> {
        Ok(self.point == point)
    }

    fn max_in_direction(
        &self,
        direction: Direction,
    ) -> Result<i32, HexError> {
        Ok(self.point.in_direction(direction))
    }

    fn points(&self) -> Box<dyn Iterator<Item = HexPoint> + '_> {
        Box::new(iter::once(self.point))
    }
}

/// The six points adjacent to an origin (a ring of radius 1, but with a
/// cheaper direction-mapped enumeration).
#[derive(Copy, Clone, Debug)]
pub struct AdjacentRegion {
    origin: HexPoint,
}

impl AdjacentRegion {
    pub fn new(origin: HexPoint) -> Self {
        Self { origin }
    }
}

impl Region for AdjacentRegion {
    fn count(&self) -> Result<usize, HexError> {
        Ok(6)
    }

    fn contains(&self, point: HexPoint) -> Result<bool, HexError> {
        Ok((point - self.origin).min_manhattan() == 1)
    }

    fn max_in_direction(
        &self,
        direction: Direction,
    ) -> Result<i32, HexError> {
        Ok(self.origin.in_direction(direction) + 1)
    }

    /// The six unit directions added to the origin, in CCW order.
    fn points(&self) -> Box<dyn Iterator<Item = HexPoint> + '_> {
        Box::new(self.origin.adjacents())
    }
}

/// The hollow ring of points at an exact distance from an origin.
#[derive(Copy, Clone, Debug)]
pub struct RingRegion {
    radius: i32,
    origin: HexPoint,
}

impl RingRegion {
    /// Create a ring at distance `radius` from `origin`. The radius must be
    /// at least 1 (a radius-0 "ring" would be a [PointRegion]).
    pub fn new(radius: i32, origin: HexPoint) -> Result<Self, HexError> {
        if radius < 1 {
            return Err(HexError::InvalidRadius { radius });
        }
        Ok(Self { radius, origin })
    }
}

impl Region for RingRegion {
    fn count(&self) -> Result<usize, HexError> {
        Ok(self.radius as usize * 6)
    }

    fn contains(&self, point: HexPoint) -> Result<bool, HexError> {
        Ok((point - self.origin).min_manhattan() == self.radius)
    }

    fn max_in_direction(
        &self,
        direction: Direction,
    ) -> Result<i32, HexError> {
        Ok(self.origin.in_direction(direction) + self.radius)
    }

    /// A single full ring walk: start at `origin + Right * radius`, walk
    /// the six sides of length `radius` counterclockwise.
    fn points(&self) -> Box<dyn Iterator<Item = HexPoint> + '_> {
        Box::new(RingWalk::new(
            self.origin,
            self.radius,
            Direction::Right,
            6,
            true,
        ))
    }
}

/// The filled hexagonal disk of all points within a distance of an origin.
#[derive(Copy, Clone, Debug)]
pub struct HexagonRegion {
    radius: i32,
    origin: HexPoint,
}

impl HexagonRegion {
    /// Create a filled disk extending `radius` hexes from `origin`. A
    /// radius of 0 is a single hex.
    pub fn new(radius: i32, origin: HexPoint) -> Result<Self, HexError> {
        if radius < 0 {
            return Err(HexError::InvalidRadius { radius });
        }
        Ok(Self { radius, origin })
    }
}

impl Region for HexagonRegion {
    fn count(&self) -> Result<usize, HexError> {
        // 1 + 3r(r+1): one center, plus 6k more for each ring k
        let r = self.radius as usize;
        Ok(1 + 3 * r * (r + 1))
    }

    fn contains(&self, point: HexPoint) -> Result<bool, HexError> {
        Ok((point - self.origin).min_manhattan() <= self.radius)
    }

    fn max_in_direction(
        &self,
        direction: Direction,
    ) -> Result<i32, HexError> {
        Ok(self.origin.in_direction(direction) + self.radius)
    }

    /// Concentric ring walks, innermost first: the origin, then each ring
    /// from 1 to `radius` via the full-ring walk.
    fn points(&self) -> Box<dyn Iterator<Item = HexPoint> + '_> {
        let origin = self.origin;
        Box::new((0..=self.radius).flat_map(move |ring| {
            RingWalk::new(origin, ring, Direction::Right, 6, true)
        }))
    }
}

/// A straight line of points along a single direction from an origin.
#[derive(Copy, Clone, Debug)]
pub struct RayRegion {
    distance: i32,
    direction: Direction,
    origin: HexPoint,
}

impl RayRegion {
    /// Create a ray of `distance + 1` points: the origin, plus `distance`
    /// steps along `direction`.
    pub fn new(
        distance: i32,
        direction: Direction,
        origin: HexPoint,
    ) -> Result<Self, HexError> {
        if distance < 0 {
            return Err(HexError::InvalidRadius { radius: distance });
        }
        Ok(Self {
            distance,
            direction,
            origin,
        })
    }
}

impl Region for RayRegion {
    fn count(&self) -> Result<usize, HexError> {
        Ok(self.distance as usize + 1)
    }

    fn contains(&self, point: HexPoint) -> Result<bool, HexError> {
        let v = (point - self.origin).minimized();
        let d = v.manhattan();
        Ok(d <= self.distance && v == self.direction.to_point() * d)
    }

    fn max_in_direction(
        &self,
        direction: Direction,
    ) -> Result<i32, HexError> {
        // The ray is a segment, so the extremes sit at its endpoints
        let far = self.origin + self.direction.to_point() * self.distance;
        Ok(self
            .origin
            .in_direction(direction)
            .max(far.in_direction(direction)))
    }

    /// Origin outward, one step at a time.
    fn points(&self) -> Box<dyn Iterator<Item = HexPoint> + '_> {
        let origin = self.origin;
        let step = self.direction.to_point();
        Box::new((0..=self.distance).map(move |i| origin + step * i))
    }
}

/// The six-pointed star: every on-axis point within a distance of the
/// origin, in all six directions at once.
#[derive(Copy, Clone, Debug)]
pub struct StarRegion {
    distance: i32,
    origin: HexPoint,
}

impl StarRegion {
    pub fn new(distance: i32, origin: HexPoint) -> Result<Self, HexError> {
        if distance < 0 {
            return Err(HexError::InvalidRadius { radius: distance });
        }
        Ok(Self { distance, origin })
    }
}

impl Region for StarRegion {
    fn count(&self) -> Result<usize, HexError> {
        Ok(self.distance as usize * 6 + 1)
    }

    fn contains(&self, point: HexPoint) -> Result<bool, HexError> {
        let v = (point - self.origin).minimized();
        let d = v.manhattan();
        // On-axis means one component carries the whole norm
        Ok(d <= self.distance
            && (v.x.abs() == d || v.y.abs() == d || v.z.abs() == d))
    }

    fn max_in_direction(
        &self,
        direction: Direction,
    ) -> Result<i32, HexError> {
        Ok(self.origin.in_direction(direction) + self.distance)
    }

    /// The origin, then each arm in CCW order, walking outward.
    fn points(&self) -> Box<dyn Iterator<Item = HexPoint> + '_> {
        let origin = self.origin;
        let distance = self.distance;
        Box::new(iter::once(origin).chain(
            Direction::COUNTER_CLOCKWISE.iter().flat_map(move |dir| {
                let step = dir.to_point();
                (1..=distance).map(move |i| origin + step * i)
            }),
        ))
    }
}

/// An angular wedge (cone) of a filled disk: the points within `radius` of
/// the origin whose bearing falls in the counterclockwise arc from `start`
/// to `end`, both boundary rays included. The origin itself is always
/// contained.
#[derive(Copy, Clone, Debug)]
pub struct WedgeRegion {
    start: Direction,
    end: Direction,
    radius: i32,
    origin: HexPoint,
    /// Number of 60° sectors the arc spans, in [1, 5]
    sides: usize,
}

impl WedgeRegion {
    /// Create a wedge from the clockwise bound `start` counterclockwise
    /// around to `end`. Equal bounds are rejected: a full disk is a
    /// [HexagonRegion] and a zero-width slice is a [RayRegion].
    pub fn new(
        start: Direction,
        end: Direction,
        radius: i32,
        origin: HexPoint,
    ) -> Result<Self, HexError> {
        if start == end {
            return Err(HexError::DegenerateWedge { direction: start });
        }
        if radius < 0 {
            return Err(HexError::InvalidRadius { radius });
        }
        let sides = (end.ccw_index() + 6 - start.ccw_index()) % 6;
        Ok(Self {
            start,
            end,
            radius,
            origin,
            sides,
        })
    }

    /// Whether a direction lies on the CCW arc from start to end, bounds
    /// included
    fn arc_contains(&self, direction: Direction) -> bool {
        let offset =
            (direction.ccw_index() + 6 - self.start.ccw_index()) % 6;
        offset <= self.sides
    }
}

impl Region for WedgeRegion {
    fn count(&self) -> Result<usize, HexError> {
        // Ring k contributes sides*k + 1 points (both boundary rays are
        // included), plus one for the origin
        let r = self.radius as usize;
        Ok(self.sides * r * (r + 1) / 2 + r + 1)
    }

    fn contains(&self, point: HexPoint) -> Result<bool, HexError> {
        let v = point - self.origin;
        if v.min_manhattan() > self.radius {
            return Ok(false);
        }
        if v == HexPoint::ORIGIN {
            // The origin has no bearing, so every wedge contains it
            return Ok(true);
        }
        // In range; the point is inside iff its whole containing-direction
        // set falls on the arc. Nonzero was just checked, so this can't
        // fail.
        let (first, second) = v.containing_directions().unwrap();
        Ok(self.arc_contains(first)
            && second.map_or(true, |dir| self.arc_contains(dir)))
    }

    fn max_in_direction(
        &self,
        direction: Direction,
    ) -> Result<i32, HexError> {
        let base = self.origin.in_direction(direction);
        if self.arc_contains(direction) {
            Ok(base + self.radius)
        } else {
            Ok(base)
        }
    }

    /// Concentric partial ring walks, innermost first: ring k starts on
    /// the `start` boundary ray and walks counterclockwise to the `end`
    /// ray, both corners included.
    fn points(&self) -> Box<dyn Iterator<Item = HexPoint> + '_> {
        let origin = self.origin;
        let start = self.start;
        let sides = self.sides;
        Box::new((0..=self.radius).flat_map(move |ring| {
            RingWalk::new(origin, ring, start, sides, false)
        }))
    }
}

/// A "rectangle" on the sheared hex lattice: `height` rows of `width`
/// points. Rows run along the `main` axis and advance along the `cross`
/// axis, with a half-row skew correction applied every two rows so the
/// result is a true rectangle on screen rather than a parallelogram.
#[derive(Copy, Clone, Debug)]
pub struct RectRegion {
    origin: HexPoint,
    main: Direction,
    cross: Direction,
    width: i32,
    height: i32,
    /// +1 when the cross axis leans forward of main (60° apart), -1 when
    /// it leans backward (120° apart). Decides the skew correction's sign.
    lean: i32,
}

impl RectRegion {
    /// Create a rectangle whose row 0 starts at `origin`. `main` and
    /// `cross` must not be parallel; sizes must be non-negative (a zero
    /// size is a legitimate empty region).
    pub fn new(
        origin: HexPoint,
        main: Direction,
        cross: Direction,
        width: i32,
        height: i32,
    ) -> Result<Self, HexError> {
        if width < 0 || height < 0 {
            return Err(HexError::InvalidSize { width, height });
        }
        let steps = (cross.ccw_index() + 6 - main.ccw_index()) % 6;
        let lean = match steps {
            1 | 5 => 1,
            2 | 4 => -1,
            _ => return Err(HexError::ParallelAxes { main, cross }),
        };
        Ok(Self {
            origin,
            main,
            cross,
            width,
            height,
            lean,
        })
    }

    /// Where row `j` starts: `j` cross steps from the origin, pulled back
    /// along main by the accumulated skew
    fn row_origin(&self, j: i32) -> HexPoint {
        self.origin + self.cross.to_point() * j
            - self.main.to_point() * (self.lean * (j / 2))
    }
}

impl Region for RectRegion {
    fn count(&self) -> Result<usize, HexError> {
        Ok((self.width * self.height) as usize)
    }

    fn contains(&self, point: HexPoint) -> Result<bool, HexError> {
        // Decompose the offset over the two axes. Standard forms make this
        // a 2x2 integer system, and non-parallel unit axes always have
        // determinant ±1, so the solution is exact.
        let v = (point - self.origin).standardized();
        let m = self.main.to_point().standardized();
        let c = self.cross.to_point().standardized();
        let det = m.x * c.y - m.y * c.x;
        debug_assert!(det == 1 || det == -1);

        let i = det * (c.y * v.x - c.x * v.y);
        let j = det * (m.x * v.y - m.y * v.x);
        if j < 0 || j >= self.height {
            return Ok(false);
        }
        // Undo the skew to recover the column within the row
        let column = i + self.lean * (j / 2);
        Ok(column >= 0 && column < self.width)
    }

    fn max_in_direction(
        &self,
        direction: Direction,
    ) -> Result<i32, HexError> {
        if self.width == 0 || self.height == 0 {
            return Ok(i32::MIN);
        }
        // The skew offset is monotone in the row index, so the extremes
        // along any axis sit in the first or last row pair; checking the
        // ends of those rows is exhaustive
        let mut max = i32::MIN;
        for j in [0, 1, self.height - 2, self.height - 1] {
            if j < 0 || j >= self.height {
                continue;
            }
            let row = self.row_origin(j);
            for i in [0, self.width - 1] {
                let p = row + self.main.to_point() * i;
                max = max.max(p.in_direction(direction));
            }
        }
        Ok(max)
    }

    /// Row by row along the cross axis; within a row, along the main axis.
    fn points(&self) -> Box<dyn Iterator<Item = HexPoint> + '_> {
        let this = *self;
        Box::new((0..self.height).flat_map(move |j| {
            let row = this.row_origin(j);
            let step = this.main.to_point();
            (0..this.width).map(move |i| row + step * i)
        }))
    }
}
