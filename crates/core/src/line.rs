//! Hex line drawing and line-of-sight checks.
//!
//! A [HexLine] rasterizes the ideal segment between two cells onto the
//! grid. At some steps two cells are (nearly) equally close to the
//! segment; rather than picking one arbitrarily, the line yields both in
//! a [LinePoint] and lets the caller decide; for line of sight, either
//! one counts as "on the line".

use crate::{
    error::HexError,
    hex::HexPoint,
    region::Region,
};

/// One step of a rasterized line: the best-fitting cell, plus a second
/// cell when one was just as close to the ideal segment.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LinePoint {
    pub a: HexPoint,
    pub b: Option<HexPoint>,
}

impl LinePoint {
    /// The 1–2 cells of this step.
    pub fn points(self) -> impl Iterator<Item = HexPoint> {
        std::iter::once(self.a).chain(self.b)
    }

    /// Whether either cell of this step is the given point.
    pub fn is_at(self, point: HexPoint) -> bool {
        self.points().any(|p| p == point)
    }
}

impl From<HexPoint> for LinePoint {
    fn from(a: HexPoint) -> Self {
        Self { a, b: None }
    }
}

/// A line of cells between two points, produced by walking candidate
/// steps toward the end and keeping whichever lies closest to the ideal
/// segment.
pub struct HexLine {
    start: HexPoint,
    end: HexPoint,
    /// How much the distances of two candidate cells from the segment may
    /// differ while still counting as "equally close".
    tolerance: f64,
    /// The 1–2 unit vectors that make progress toward the end; empty for
    /// a degenerate single-point line.
    steps: Vec<HexPoint>,
}

impl HexLine {
    pub const DEFAULT_TOLERANCE: f64 = 0.1;

    pub fn new(start: HexPoint, end: HexPoint) -> Self {
        Self::with_tolerance(start, end, Self::DEFAULT_TOLERANCE)
    }

    pub fn with_tolerance(
        start: HexPoint,
        end: HexPoint,
        tolerance: f64,
    ) -> Self {
        let steps = if start == end {
            Vec::new()
        } else {
            // Nonzero displacement, so the decomposition can't fail
            let (first, second) =
                (end - start).containing_directions().unwrap();
            std::iter::once(first)
                .chain(second)
                .map(|dir| dir.to_point())
                .collect()
        };
        Self {
            start,
            end,
            tolerance,
            steps,
        }
    }

    pub fn start(&self) -> HexPoint {
        self.start
    }

    pub fn end(&self) -> HexPoint {
        self.end
    }

    /// Walk the line from start to end. The first step is always the
    /// start alone; the last always includes the end.
    pub fn points(&self) -> impl Iterator<Item = LinePoint> + '_ {
        LineIter {
            line: self,
            current: None,
            done: false,
        }
    }

    /// How far a cell sits from the ideal segment, in a sheared plane.
    /// The absolute value means little, but comparing two cells' results
    /// is equivalent to comparing their true perpendicular distances.
    fn distance_from_line(&self, point: HexPoint) -> f64 {
        let line = (self.end - self.start).minimized();
        let v = point - self.start;
        // Flatten both vectors onto the coordinate plane of the line's
        // zeroed axis. The substitution re-expresses the vector without
        // the dropped component (it can't just be ignored).
        let ((lx, ly), (px, py)) = if line.x == 0 {
            ((line.y, line.z), (v.y - v.x, v.z + v.x))
        } else if line.y == 0 {
            ((line.x, line.z), (v.x - v.y, v.z + v.y))
        } else {
            ((line.x, line.y), (v.x + v.z, v.y + v.z))
        };
        let (lx, ly) = (lx as f64, ly as f64);
        let (px, py) = (px as f64, py as f64);

        let length = (lx * lx + ly * ly).sqrt();
        let (ux, uy) = (lx / length, ly / length);
        let dot = px * ux + py * uy;
        let (rx, ry) = (px - dot * ux, py - dot * uy);
        (rx * rx + ry * ry).sqrt()
    }

    /// The prefix of the line that passes the allow/deny filters: each
    /// step narrowed to its passing cells, cut off at the first step with
    /// none. Errors if a filter region can't answer containment.
    pub fn while_clear(
        &self,
        allowed: Option<&dyn Region>,
        disallowed: Option<&dyn Region>,
    ) -> Result<Vec<LinePoint>, HexError> {
        // Probe once so the loop can't fail mid-walk
        if let Some(region) = allowed {
            region.contains(self.start)?;
        }
        if let Some(region) = disallowed {
            region.contains(self.start)?;
        }
        let passes = |point: HexPoint| {
            let ok = allowed.map_or(true, |region| {
                region
                    .contains(point)
                    .expect("allowed region containment was probed")
            });
            let denied = disallowed.map_or(false, |region| {
                region
                    .contains(point)
                    .expect("disallowed region containment was probed")
            });
            ok && !denied
        };

        let mut clear = Vec::new();
        for step in self.points() {
            let good: Vec<HexPoint> =
                step.points().filter(|&p| passes(p)).collect();
            match good[..] {
                [] => break,
                [a] => clear.push(LinePoint { a, b: None }),
                [a, b, ..] => clear.push(LinePoint { a, b: Some(b) }),
            }
        }
        Ok(clear)
    }

    /// The last clear step of the line, or None when even the start is
    /// blocked.
    pub fn furthest_clear_point(
        &self,
        allowed: Option<&dyn Region>,
        disallowed: Option<&dyn Region>,
    ) -> Result<Option<LinePoint>, HexError> {
        Ok(self.while_clear(allowed, disallowed)?.pop())
    }

    /// Whether the line reaches its end without hitting a blocked step.
    /// This is the line-of-sight test.
    pub fn is_clear(
        &self,
        allowed: Option<&dyn Region>,
        disallowed: Option<&dyn Region>,
    ) -> Result<bool, HexError> {
        if allowed.is_none() && disallowed.is_none() {
            return Ok(true);
        }
        Ok(self
            .furthest_clear_point(allowed, disallowed)?
            .map_or(false, |step| step.is_at(self.end)))
    }
}

struct LineIter<'a> {
    line: &'a HexLine,
    current: Option<LinePoint>,
    done: bool,
}

impl Iterator for LineIter<'_> {
    type Item = LinePoint;

    fn next(&mut self) -> Option<LinePoint> {
        if self.done {
            return None;
        }
        let current = match self.current {
            None => {
                // First pull: the start, alone
                let first = LinePoint::from(self.line.start);
                if self.line.start == self.line.end {
                    self.done = true;
                }
                self.current = Some(first);
                return Some(first);
            }
            Some(current) => current,
        };

        // Candidate cells: every step direction applied to every cell of
        // the previous line point, ranked by distance from the segment
        let mut candidates: Vec<(HexPoint, f64)> = current
            .points()
            .flat_map(|base| {
                self.line
                    .steps
                    .iter()
                    .map(move |step| base + *step)
            })
            .map(|p| (p, self.line.distance_from_line(p)))
            .collect();
        candidates.sort_by(|a, b| {
            a.1.partial_cmp(&b.1).expect("segment distances are finite")
        });
        // The same cell can be reached from both bases; drop the echo
        candidates.dedup_by(|a, b| a.0 == b.0);

        let next = match candidates[..] {
            [(a, _)] => LinePoint { a, b: None },
            [(a, da), (b, db), ..]
                if (da - db).abs() <= self.line.tolerance =>
            {
                LinePoint { a, b: Some(b) }
            }
            [(a, _), ..] => LinePoint { a, b: None },
            [] => unreachable!("a non-degenerate line always has steps"),
        };
        if next.a == self.line.end {
            self.done = true;
        }
        self.current = Some(next);
        Some(next)
    }
}
