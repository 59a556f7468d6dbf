//! Regions: testable, enumerable sets of hex points.
//!
//! A [Region] is the capability gameplay code uses to ask "which cells are
//! in this shape?". Concrete shapes (rings, disks, wedges, flood fills; see
//! [crate::region::shape] and [crate::region::flood]) and set combinators
//! ([UnionRegion], [IntersectRegion], [SubtractRegion], [OffsetRegion]) all
//! implement it.
//!
//! ## Aliasing
//!
//! Combinators hold *references* to their operands, never copies. That
//! makes them cheap, but it means mutating a mutable operand (a
//! [SetRegion], say) changes what the combinator observes afterwards. This
//! is deliberate. When you need a stable snapshot, take one explicitly with
//! [Region::materialize].
//!
//! ## Laziness
//!
//! Enumeration does work only as it's advanced, and can be restarted by
//! calling [Region::points] again. The one exception is regions driven by
//! a random source, which may enumerate in a different order each time
//! (but never with different membership). A few search-backed shapes can't
//! answer `contains`-style queries at all until materialized; those return
//! [HexError::Unmaterialized].

mod combinator;
pub mod flood;
pub mod shape;

pub use combinator::*;

use crate::{
    error::HexError,
    hex::{Direction, HexPoint, HexPointIndexSet},
};
use serde::{
    de::{Deserializer, SeqAccess, Visitor},
    ser::{SerializeSeq, Serializer},
    Deserialize, Serialize,
};
use std::fmt;

/// A set of points on the hex grid, queryable three ways: membership,
/// enumeration, and directional bound.
pub trait Region {
    /// The number of points in this region.
    fn count(&self) -> Result<usize, HexError>;

    /// Whether the given point is in this region. Consistent with
    /// [Self::points]: a point is yielded by the enumeration iff this
    /// returns true for it.
    fn contains(&self, point: HexPoint) -> Result<bool, HexError>;

    /// The largest extent of any contained point along `direction`, per
    /// [HexPoint::in_direction]. Tight for the primitive shapes; an upper
    /// bound for combinators. For the minimum extent, query the opposite
    /// direction and negate: `min(right) == -max_in_direction(Left)`.
    ///
    /// An empty region reports `i32::MIN` (the identity of max).
    fn max_in_direction(&self, direction: Direction)
        -> Result<i32, HexError>;

    /// Enumerate the points of this region. Order is shape-specific; see
    /// each shape's documentation.
    fn points(&self) -> Box<dyn Iterator<Item = HexPoint> + '_>;

    /// Copy this region's points into a concrete [SetRegion]. Use this to
    /// snapshot an aliasing combinator, or to unlock `contains`-style
    /// queries on the search-backed shapes.
    fn materialize(&self) -> SetRegion {
        self.points().collect()
    }
}

/// A materialized region: a concrete, mutable set of points. This is the
/// only mutable region, and the target of [Region::materialize].
///
/// Enumeration order is insertion order, so materializing preserves the
/// source shape's documented order.
#[derive(Clone, Debug, Default)]
pub struct SetRegion {
    points: HexPointIndexSet,
}

impl SetRegion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a point to the region. Returns true if the point was not
    /// already present.
    pub fn insert(&mut self, point: HexPoint) -> bool {
        self.points.insert(point)
    }

    /// Remove a point from the region, preserving the order of the rest.
    /// Returns true if the point was present.
    pub fn remove(&mut self, point: HexPoint) -> bool {
        self.points.shift_remove(&point)
    }

    pub fn clear(&mut self) {
        self.points.clear()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = HexPoint> + '_ {
        self.points.iter().copied()
    }
}

impl Region for SetRegion {
    fn count(&self) -> Result<usize, HexError> {
        Ok(self.points.len())
    }

    fn contains(&self, point: HexPoint) -> Result<bool, HexError> {
        Ok(self.points.contains(&point))
    }

    fn max_in_direction(
        &self,
        direction: Direction,
    ) -> Result<i32, HexError> {
        Ok(self
            .points
            .iter()
            .map(|point| point.in_direction(direction))
            .max()
            .unwrap_or(i32::MIN))
    }

    fn points(&self) -> Box<dyn Iterator<Item = HexPoint> + '_> {
        Box::new(self.points.iter().copied())
    }

    fn materialize(&self) -> SetRegion {
        self.clone()
    }
}

impl FromIterator<HexPoint> for SetRegion {
    fn from_iter<I: IntoIterator<Item = HexPoint>>(iter: I) -> Self {
        let mut points = HexPointIndexSet::default();
        points.extend(iter);
        Self { points }
    }
}

impl Extend<HexPoint> for SetRegion {
    fn extend<I: IntoIterator<Item = HexPoint>>(&mut self, iter: I) {
        self.points.extend(iter)
    }
}

impl<'a> IntoIterator for &'a SetRegion {
    type Item = HexPoint;
    type IntoIter = std::iter::Copied<indexmap::set::Iter<'a, HexPoint>>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter().copied()
    }
}

// Serialize as a plain sequence of points, because sets with custom hashers
// don't round-trip on their own
impl Serialize for SetRegion {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.points.len()))?;
        for point in &self.points {
            seq.serialize_element(point)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for SetRegion {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error> {
        struct SetRegionVisitor;

        impl<'de> Visitor<'de> for SetRegionVisitor {
            type Value = SetRegion;

            fn expecting(
                &self,
                formatter: &mut fmt::Formatter,
            ) -> fmt::Result {
                formatter.write_str("a sequence of hex points")
            }

            fn visit_seq<A: SeqAccess<'de>>(
                self,
                mut seq: A,
            ) -> Result<Self::Value, A::Error> {
                let mut region = SetRegion::new();
                while let Some(point) = seq.next_element::<HexPoint>()? {
                    region.insert(point);
                }
                Ok(region)
            }
        }

        deserializer.deserialize_seq(SetRegionVisitor)
    }
}

/// The region containing no points at all.
#[derive(Copy, Clone, Debug, Default)]
pub struct EmptyRegion;

impl Region for EmptyRegion {
    fn count(&self) -> Result<usize, HexError> {
        Ok(0)
    }

    fn contains(&self, _point: HexPoint) -> Result<bool, HexError> {
        Ok(false)
    }

    fn max_in_direction(
        &self,
        _direction: Direction,
    ) -> Result<i32, HexError> {
        Ok(i32::MIN)
    }

    fn points(&self) -> Box<dyn Iterator<Item = HexPoint> + '_> {
        Box::new(std::iter::empty())
    }
}
