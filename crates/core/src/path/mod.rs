//! Paths across the grid and the search machinery that produces them.
//!
//! A [HexPath] is a compact run-length encoding of a walk: an origin plus
//! a list of [Stretch]es, each a direction and how many hexes to travel
//! along it. The search engine itself ([AStarSearch]) is graph-generic;
//! [PathQuery] instantiates it over hex adjacency with region-based
//! filters and goals.

mod astar;
mod finder;

pub use self::{astar::*, finder::*};

use crate::{
    error::HexError,
    hex::{Direction, HexPoint},
};
use serde::{Deserialize, Serialize};

/// A straight run of a path: some number of steps in one direction. The
/// length is always at least 1.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stretch {
    pub direction: Direction,
    pub length: usize,
}

/// A walk across the grid: an origin and an ordered list of stretches.
///
/// Consecutive stretches are allowed to share a direction (concatenating
/// paths doesn't merge runs across the seam), but paths produced by the
/// search engine are always coalesced to the minimal stretch list.
///
/// The destination is just the origin with every stretch replayed; it's
/// cached and kept in sync by the mutators, which only ever append
/// stretches or clear the whole path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HexPath {
    origin: HexPoint,
    destination: HexPoint,
    stretches: Vec<Stretch>,
}

impl HexPath {
    /// A path that starts and ends at `origin` without going anywhere.
    pub fn new(origin: HexPoint) -> Self {
        Self {
            origin,
            destination: origin,
            stretches: Vec::new(),
        }
    }

    /// Build a path from parts. Errors if any stretch is zero-length.
    pub fn with_stretches(
        origin: HexPoint,
        stretches: Vec<Stretch>,
    ) -> Result<Self, HexError> {
        let mut destination = origin;
        for stretch in &stretches {
            if stretch.length == 0 {
                return Err(HexError::EmptyStretch);
            }
            destination = destination
                + stretch.direction.to_point() * stretch.length as i32;
        }
        Ok(Self {
            origin,
            destination,
            stretches,
        })
    }

    /// Concatenate a sequence of path legs into one path.
    ///
    /// Panics if the sequence is empty, or if any leg doesn't start where
    /// the previous one ended; a discontinuous route is a programming
    /// error, not a recoverable condition.
    pub fn from_legs(legs: impl IntoIterator<Item = HexPath>) -> Self {
        let mut legs = legs.into_iter();
        let mut path = legs
            .next()
            .expect("cannot concatenate an empty sequence of path legs");
        for leg in legs {
            assert!(
                path.destination == leg.origin,
                "discontinuous route: leg starts at {} but the previous \
                 leg ended at {}",
                leg.origin,
                path.destination,
            );
            path.stretches.extend(leg.stretches);
            path.destination = leg.destination;
        }
        path
    }

    pub fn origin(&self) -> HexPoint {
        self.origin
    }

    pub fn destination(&self) -> HexPoint {
        self.destination
    }

    pub fn stretches(&self) -> &[Stretch] {
        &self.stretches
    }

    /// The total number of steps in the path.
    pub fn total_distance(&self) -> usize {
        self.stretches.iter().map(|stretch| stretch.length).sum()
    }

    /// The number of points on the path, origin included.
    pub fn count(&self) -> usize {
        self.total_distance() + 1
    }

    /// Append a stretch. Errors on a zero length, since an empty stretch is
    /// never representable.
    pub fn add_stretch(
        &mut self,
        direction: Direction,
        length: usize,
    ) -> Result<(), HexError> {
        if length == 0 {
            return Err(HexError::EmptyStretch);
        }
        self.stretches.push(Stretch { direction, length });
        self.destination =
            self.destination + direction.to_point() * length as i32;
        Ok(())
    }

    /// Drop every stretch, keeping the origin.
    pub fn clear(&mut self) {
        self.stretches.clear();
        self.destination = self.origin;
    }

    /// A sub-path: skip the first `start` steps, then keep at most
    /// `max_length` steps of what's left.
    pub fn partial(&self, max_length: usize, start: usize) -> HexPath {
        let mut origin = self.origin;
        let mut skip = start;
        let mut remaining = max_length;
        let mut stretches = Vec::new();

        for stretch in &self.stretches {
            let mut length = stretch.length;
            if skip > 0 {
                let skipped = skip.min(length);
                origin = origin
                    + stretch.direction.to_point() * skipped as i32;
                skip -= skipped;
                length -= skipped;
                if length == 0 {
                    continue;
                }
            }
            if remaining == 0 {
                break;
            }
            let taken = length.min(remaining);
            stretches.push(Stretch {
                direction: stretch.direction,
                length: taken,
            });
            remaining -= taken;
        }

        // Taken lengths are clamped above zero, so this can't fail
        Self::with_stretches(origin, stretches).unwrap()
    }

    /// Every point on the path in walking order, origin first.
    pub fn points(&self) -> impl Iterator<Item = HexPoint> + '_ {
        let mut current = self.origin;
        std::iter::once(self.origin).chain(
            self.stretches
                .iter()
                .flat_map(|stretch| {
                    std::iter::repeat(stretch.direction.to_point())
                        .take(stretch.length)
                })
                .map(move |step| {
                    current = current + step;
                    current
                }),
        )
    }

    /// Just the turning points: the origin, then the endpoint of each
    /// stretch.
    pub fn stretch_points(&self) -> impl Iterator<Item = HexPoint> + '_ {
        let mut current = self.origin;
        std::iter::once(self.origin).chain(self.stretches.iter().map(
            move |stretch| {
                current = current
                    + stretch.direction.to_point() * stretch.length as i32;
                current
            },
        ))
    }
}
