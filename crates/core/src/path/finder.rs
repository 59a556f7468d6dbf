//! The hex-specific pathfinding entry points: point-to-point,
//! point-to-region, multi-waypoint routes, and reachability.

use crate::{
    error::HexError,
    hex::{Direction, HexPoint, HexPointMap, HexPointSet},
    path::{AStarKey, AStarSearch, HexPath, Stretch},
    region::{shape::AdjacentRegion, Region},
};
use anyhow::{anyhow, Context};
use log::debug;

/// A reusable pathfinding query: the distance budget plus every knob that
/// shapes the search. Build one, then run it with [Self::find],
/// [Self::find_point], or [Self::route].
///
/// ```
/// use hexgrid::{HexPoint, HexagonRegion, PathQuery};
///
/// let wall = HexagonRegion::new(1, HexPoint::new(3, 0, 0)).unwrap();
/// let path = PathQuery::new(20)
///     .disallowed(&wall)
///     .find_point(HexPoint::ORIGIN, HexPoint::new(6, 0, 0))
///     .unwrap()
///     .expect("the wall can be walked around");
/// // The straight line is 6 steps; the detour costs more
/// assert!(path.total_distance() > 6);
/// ```
#[derive(Copy, Clone)]
pub struct PathQuery<'a> {
    /// The maximum total cost of the returned path. This is a hard bound:
    /// edges that would exceed it are never taken.
    max_distance: usize,
    /// If set, only points inside this region are traversable.
    allowed: Option<&'a dyn Region>,
    /// If set, points inside this region are not traversable. Applied on
    /// top of `allowed`.
    disallowed: Option<&'a dyn Region>,
    /// When true (the default), the origin is exempt from the filters;
    /// when false, a query from an untraversable origin fails.
    except_start: bool,
    /// When true (the default), goal points are traversable even if the
    /// filters say otherwise, so a path can end on an obstacle.
    except_end: bool,
    /// When true and the goal can't be reached within budget, return the
    /// path to the node that got furthest along instead of no path.
    accept_partial: bool,
}

impl<'a> PathQuery<'a> {
    pub fn new(max_distance: usize) -> Self {
        Self {
            max_distance,
            allowed: None,
            disallowed: None,
            except_start: true,
            except_end: true,
            accept_partial: false,
        }
    }

    /// Restrict traversal to the given region.
    pub fn allowed(mut self, region: &'a dyn Region) -> Self {
        self.allowed = Some(region);
        self
    }

    /// Forbid traversal through the given region.
    pub fn disallowed(mut self, region: &'a dyn Region) -> Self {
        self.disallowed = Some(region);
        self
    }

    /// Require the origin itself to pass the traversal filters.
    pub fn check_start(mut self) -> Self {
        self.except_start = false;
        self
    }

    /// Require goal points to pass the traversal filters too.
    pub fn check_end(mut self) -> Self {
        self.except_end = false;
        self
    }

    /// On an unreachable goal, settle for the path that got furthest
    /// along: the searched node with the highest accumulated distance,
    /// ties broken by the lower heuristic. Note this deliberately prefers
    /// progress over nominal closeness: a node that traveled further is
    /// a better partial answer than one that merely started out pointed
    /// the right way.
    pub fn accept_partial(mut self) -> Self {
        self.accept_partial = true;
        self
    }

    /// Find the cheapest path from `origin` to any point of the `goal`
    /// region. Returns `Ok(None)` when no path exists within the distance
    /// budget (a normal outcome, not an error). Errors indicate misuse:
    /// an empty or unenumerable goal, filter regions that can't answer
    /// containment, or an untraversable origin with
    /// [checked start](Self::check_start).
    pub fn find(
        &self,
        origin: HexPoint,
        goal: &dyn Region,
    ) -> anyhow::Result<Option<HexPath>> {
        // Enumerate the goal once; the heuristic scans this list per node
        let goal_points: Vec<HexPoint> = goal.points().collect();
        if goal_points.is_empty() {
            return Err(anyhow!("goal region is empty"));
        }
        let goal_set: HexPointSet = goal_points.iter().copied().collect();

        // Probe the filters now so the per-neighbor checks below are
        // infallible. Whether a region can answer containment depends only
        // on its shape, never on the point.
        if let Some(region) = self.allowed {
            region
                .contains(origin)
                .context("allowed region cannot answer containment")?;
        }
        if let Some(region) = self.disallowed {
            region
                .contains(origin)
                .context("disallowed region cannot answer containment")?;
        }
        if !self.except_start && !self.traversable(origin) {
            return Err(anyhow!(
                "path origin {} is not traversable and the query checks \
                 its start",
                origin
            ));
        }

        debug!(
            "Searching for a path: {} -> {} goal point(s), budget {}",
            origin,
            goal_points.len(),
            self.max_distance
        );

        let mut parents: HexPointMap<HexPoint> = HexPointMap::default();
        let mut destination: Option<HexPoint> = None;
        let mut furthest: Option<(HexPoint, AStarKey)> = None;
        {
            let heuristic = |point: &HexPoint| {
                goal_points
                    .iter()
                    .map(|goal| point.distance_to(*goal))
                    .min()
                    .expect("goal region is non-empty")
            };
            let neighbors = |point: &HexPoint| -> Vec<HexPoint> {
                AdjacentRegion::new(*point)
                    .points()
                    .filter(|&p| {
                        (self.except_end && goal_set.contains(&p))
                            || self.traversable(p)
                    })
                    .collect()
            };
            let search = AStarSearch::new(
                origin,
                self.max_distance,
                heuristic,
                |a: &HexPoint, b: &HexPoint| a.distance_to(*b),
                neighbors,
            )
            .with_connected(|from, to| {
                parents.insert(*to, *from);
            });

            for (point, key) in search {
                if goal_set.contains(&point) {
                    destination = Some(point);
                    break;
                }
                let improves = match &furthest {
                    None => true,
                    Some((_, best)) => {
                        key.distance > best.distance
                            || (key.distance == best.distance
                                && key.heuristic < best.heuristic)
                    }
                };
                if improves {
                    furthest = Some((point, key));
                }
            }
        }

        let end = match destination {
            Some(point) => point,
            None if self.accept_partial => {
                // The start node is always searched, so there's always a
                // furthest node to fall back on
                furthest.expect("search yields at least the origin").0
            }
            None => {
                debug!("No path found within budget");
                return Ok(None);
            }
        };
        let path = reconstruct(origin, end, &parents);
        debug!(
            "Found a path: {} stretch(es), total distance {}",
            path.stretches().len(),
            path.total_distance()
        );
        Ok(Some(path))
    }

    /// Find the cheapest path from `origin` to a single `destination`.
    pub fn find_point(
        &self,
        origin: HexPoint,
        destination: HexPoint,
    ) -> anyhow::Result<Option<HexPath>> {
        let goal = crate::region::shape::PointRegion::new(destination);
        self.find(origin, &goal)
    }

    /// Find a route visiting every waypoint in order, as independent
    /// point-to-point searches concatenated together. If any leg has no
    /// path, the whole route has no path. The distance budget applies per
    /// leg. Partial acceptance is ignored here: a partial leg would leave
    /// the route discontinuous.
    pub fn route(
        &self,
        waypoints: &[HexPoint],
    ) -> anyhow::Result<Option<HexPath>> {
        let first = *waypoints
            .first()
            .ok_or_else(|| anyhow!("route requires at least one waypoint"))?;
        let leg_query = PathQuery {
            accept_partial: false,
            ..*self
        };

        let mut legs = Vec::new();
        for (index, pair) in waypoints.windows(2).enumerate() {
            let leg = leg_query
                .find_point(pair[0], pair[1])
                .with_context(|| format!("route leg {}", index))?;
            match leg {
                Some(leg) => legs.push(leg),
                None => return Ok(None),
            }
        }
        if legs.is_empty() {
            // A single waypoint is a route that goes nowhere
            return Ok(Some(HexPath::new(first)));
        }
        Ok(Some(HexPath::from_legs(legs)))
    }

    /// Whether a point passes the allow/deny filters. Must only be called
    /// after the filters' containment capability has been probed.
    fn traversable(&self, point: HexPoint) -> bool {
        let allowed = self.allowed.map_or(true, |region| {
            region
                .contains(point)
                .expect("allowed region containment was probed")
        });
        let denied = self.disallowed.map_or(false, |region| {
            region
                .contains(point)
                .expect("disallowed region containment was probed")
        });
        allowed && !denied
    }
}

/// Walk the parent pointers from `end` back to `origin`, coalescing
/// consecutive steps in the same direction into run-length stretches.
fn reconstruct(
    origin: HexPoint,
    end: HexPoint,
    parents: &HexPointMap<HexPoint>,
) -> HexPath {
    let mut stretches: Vec<Stretch> = Vec::new();
    let mut current = end;
    while current != origin {
        let parent = *parents
            .get(&current)
            .expect("every searched node traces back to the origin");
        // Parents are adjacent, so the step is a unit vector with a single
        // well-defined direction
        let direction = (current - parent)
            .closest_direction()
            .expect("parent steps are unit vectors");
        match stretches.last_mut() {
            Some(last) if last.direction == direction => last.length += 1,
            _ => stretches.push(Stretch {
                direction,
                length: 1,
            }),
        }
        current = parent;
    }
    stretches.reverse();
    HexPath::with_stretches(origin, stretches)
        .expect("coalesced stretches are never empty")
}

/// The region of every point reachable from an origin within a distance
/// budget, honoring allow/deny filters: "where can this unit move?".
///
/// Like the flood fills in [crate::region::flood], this region is backed
/// by a search, so `contains`-style queries fail with
/// [HexError::Unmaterialized] until it's materialized; enumeration runs
/// the search, yielding points in expanding order of path cost.
pub struct ReachableRegion<'a> {
    origin: HexPoint,
    max_distance: usize,
    allowed: Option<&'a dyn Region>,
    disallowed: Option<&'a dyn Region>,
}

impl<'a> ReachableRegion<'a> {
    pub fn new(
        origin: HexPoint,
        max_distance: usize,
        allowed: Option<&'a dyn Region>,
        disallowed: Option<&'a dyn Region>,
    ) -> Result<Self, HexError> {
        // Probe the filters so enumeration can't fail later
        if let Some(region) = allowed {
            region.contains(origin)?;
        }
        if let Some(region) = disallowed {
            region.contains(origin)?;
        }
        Ok(Self {
            origin,
            max_distance,
            allowed,
            disallowed,
        })
    }

    fn traversable(&self, point: HexPoint) -> bool {
        let allowed = self.allowed.map_or(true, |region| {
            region
                .contains(point)
                .expect("allowed region containment was probed")
        });
        let denied = self.disallowed.map_or(false, |region| {
            region
                .contains(point)
                .expect("disallowed region containment was probed")
        });
        allowed && !denied
    }
}

impl Region for ReachableRegion<'_> {
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

    /// Runs a zero-heuristic search (Dijkstra, effectively) and yields
    /// every node it finalizes; the budget pruning inside the engine
    /// guarantees they're all within range.
    fn points(&self) -> Box<dyn Iterator<Item = HexPoint> + '_> {
        let search = AStarSearch::new(
            self.origin,
            self.max_distance,
            |_: &HexPoint| 0,
            |a: &HexPoint, b: &HexPoint| a.distance_to(*b),
            move |point: &HexPoint| -> Vec<HexPoint> {
                AdjacentRegion::new(*point)
                    .points()
                    .filter(|&p| self.traversable(p))
                    .collect()
            },
        );
        Box::new(search.map(|(point, _)| point))
    }
}
