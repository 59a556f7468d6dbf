//! Search-backed regions: flood fills and frontier expansions.
//!
//! Unlike the closed-form shapes in [crate::region::shape], these regions
//! discover their membership by running a breadth-first search, so nothing
//! short of finishing the search can answer `contains`, `count`, or
//! `max_in_direction`. Those queries return [HexError::Unmaterialized]
//! until the region is wrapped with [Region::materialize]; enumeration is
//! the one capability available directly (it *is* the search).

use crate::{
    error::HexError,
    hex::{Direction, HexPoint, HexPointSet},
    region::Region,
};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_pcg::Pcg64;

/// A breadth-first flood fill outward from a center point, constrained to
/// a search space and capped at a maximum number of points. If fewer than
/// `size` points are reachable, the region is just smaller.
///
/// Enumeration order is frontier layer by frontier layer (so it's sorted
/// by hex distance from the center, as traveled inside the search space).
/// Within a layer the order is arbitrary but deterministic, unless a
/// random order was requested with [Self::with_random_order], in which
/// case each layer is shuffled.
pub struct BfsRegion<'a> {
    center: HexPoint,
    search_space: &'a dyn Region,
    size: usize,
    seed: Option<u64>,
}

impl std::fmt::Debug for BfsRegion<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BfsRegion")
            .field("center", &self.center)
            .field("size", &self.size)
            .field("seed", &self.seed)
            .finish_non_exhaustive()
    }
}

impl<'a> BfsRegion<'a> {
    /// Create a flood fill of up to `size` points, spreading from `center`
    /// through `search_space`. Errors if the center isn't in the search
    /// space, or if the search space can't answer containment (wrap it
    /// first).
    pub fn new(
        center: HexPoint,
        search_space: &'a dyn Region,
        size: usize,
    ) -> Result<Self, HexError> {
        if !search_space.contains(center)? {
            return Err(HexError::CenterOutsideSearchSpace);
        }
        Ok(Self {
            center,
            search_space,
            size,
            seed: None,
        })
    }

    /// Shuffle each frontier layer before yielding it, seeded by `seed`.
    /// Re-enumerating the same region replays the same order; build a
    /// second region with a different seed for a different shuffle.
    pub fn with_random_order(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Region for BfsRegion<'_> {
    fn count(&self) -> Result<usize, HexError> {
        // The search might not be able to realize `size` points, so there's
        // no answer short of running it
        Err(HexError::Unmaterialized { operation: "count" })
    }

    fn contains(&self, _point: HexPoint) -> Result<bool, HexError> {
        Err(HexError::Unmaterialized {
            operation: "contains",
        })
    }

    fn max_in_direction(
        &self,
        _direction: Direction,
    ) -> Result<i32, HexError> {
        Err(HexError::Unmaterialized {
            operation: "max_in_direction",
        })
    }

    fn points(&self) -> Box<dyn Iterator<Item = HexPoint> + '_> {
        let mut found = HexPointSet::default();
        found.insert(self.center);
        Box::new(FloodIter {
            search_space: self.search_space,
            found,
            layer: Vec::new(),
            cursor: 0,
            next_layer: vec![self.center],
            remaining: self.size,
            rings_left: None,
            rng: self.seed.map(Pcg64::seed_from_u64),
        })
    }
}

/// A breadth-first expansion strictly outward from the boundary of a base
/// region, through a search space, out to a fixed number of rings. The
/// base's own points are excluded from the output unless `include_base`
/// is set.
///
/// Enumeration order: the base points first (when included), then ring by
/// ring outward.
pub struct ExpandRegion<'a> {
    base: &'a dyn Region,
    search_space: &'a dyn Region,
    radius: i32,
    include_base: bool,
}

impl<'a> ExpandRegion<'a> {
    pub fn new(
        base: &'a dyn Region,
        search_space: &'a dyn Region,
        radius: i32,
        include_base: bool,
    ) -> Result<Self, HexError> {
        if radius < 0 {
            return Err(HexError::InvalidRadius { radius });
        }
        // Probe the search space now so enumeration can rely on membership
        // tests succeeding
        search_space.contains(HexPoint::ORIGIN)?;
        Ok(Self {
            base,
            search_space,
            radius,
            include_base,
        })
    }
}

impl Region for ExpandRegion<'_> {
    fn count(&self) -> Result<usize, HexError> {
        Err(HexError::Unmaterialized { operation: "count" })
    }

    fn contains(&self, _point: HexPoint) -> Result<bool, HexError> {
        Err(HexError::Unmaterialized {
            operation: "contains",
        })
    }

    fn max_in_direction(
        &self,
        _direction: Direction,
    ) -> Result<i32, HexError> {
        Err(HexError::Unmaterialized {
            operation: "max_in_direction",
        })
    }

    fn points(&self) -> Box<dyn Iterator<Item = HexPoint> + '_> {
        // Seed the found set with the whole base so the expansion never
        // walks back inside, then build ring 1 off the base's boundary
        let mut found: HexPointSet = self.base.points().collect();
        let mut first_ring = Vec::new();
        for p in self.base.points() {
            push_neighbors(
                p,
                self.search_space,
                &mut found,
                &mut first_ring,
            );
        }
        let base_points: Vec<HexPoint> = if self.include_base {
            self.base.points().collect()
        } else {
            Vec::new()
        };

        Box::new(base_points.into_iter().chain(FloodIter {
            search_space: self.search_space,
            found,
            layer: Vec::new(),
            cursor: 0,
            next_layer: first_ring,
            remaining: usize::MAX,
            rings_left: Some(self.radius),
            rng: None,
        }))
    }
}

/// Shared layered-BFS pump behind [BfsRegion] and [ExpandRegion]. Yields
/// the current layer point by point, expanding each yielded point's
/// neighbors into the next layer; stops on an exhausted point budget, an
/// exhausted ring budget, or an empty frontier.
struct FloodIter<'a> {
    search_space: &'a dyn Region,
    found: HexPointSet,
    layer: Vec<HexPoint>,
    cursor: usize,
    next_layer: Vec<HexPoint>,
    /// Points still allowed to be yielded
    remaining: usize,
    /// Layers still allowed to be started, if bounded by rings
    rings_left: Option<i32>,
    rng: Option<Pcg64>,
}

impl Iterator for FloodIter<'_> {
    type Item = HexPoint;

    fn next(&mut self) -> Option<HexPoint> {
        if self.remaining == 0 {
            return None;
        }
        if self.cursor == self.layer.len() {
            if let Some(rings) = &mut self.rings_left {
                if *rings == 0 {
                    return None;
                }
                *rings -= 1;
            }
            self.layer = std::mem::take(&mut self.next_layer);
            self.cursor = 0;
            if self.layer.is_empty() {
                return None;
            }
            if let Some(rng) = &mut self.rng {
                self.layer.shuffle(rng);
            }
        }

        let point = self.layer[self.cursor];
        self.cursor += 1;
        self.remaining -= 1;
        push_neighbors(
            point,
            self.search_space,
            &mut self.found,
            &mut self.next_layer,
        );
        Some(point)
    }
}

/// Queue every unseen in-space neighbor of `point` for the next layer
fn push_neighbors(
    point: HexPoint,
    search_space: &dyn Region,
    found: &mut HexPointSet,
    next_layer: &mut Vec<HexPoint>,
) {
    for neighbor in point.adjacents() {
        // Capability was probed at construction time
        let in_space = search_space
            .contains(neighbor)
            .expect("search space containment was probed at construction");
        if in_space && found.insert(neighbor) {
            next_layer.push(neighbor);
        }
    }
}
