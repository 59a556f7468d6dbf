//! Set combinators over regions. All of these hold references to their
//! operands rather than copying them; see the module docs in
//! [crate::region] for the aliasing contract.
//!
//! Enumeration of a combinator is not free: it hashes one operand into a
//! scratch set to answer membership for the other, so the cost is
//! proportional to the operand sizes.

use crate::{
    error::HexError,
    hex::{Direction, HexPoint, HexPointSet},
    region::Region,
};

/// Builder-style constructors for the combinators, so region expressions
/// read left to right: `disk.subtract(&wall).offset(v)`.
pub trait RegionExt: Region {
    /// The set union of this region and another.
    fn union<'a>(&'a self, other: &'a dyn Region) -> UnionRegion<'a>
    where
        Self: Sized,
    {
        UnionRegion::new(self, other)
    }

    /// The set intersection of this region and another.
    fn intersect<'a>(&'a self, other: &'a dyn Region) -> IntersectRegion<'a>
    where
        Self: Sized,
    {
        IntersectRegion::new(self, other)
    }

    /// This region minus the points of another.
    fn subtract<'a>(&'a self, other: &'a dyn Region) -> SubtractRegion<'a>
    where
        Self: Sized,
    {
        SubtractRegion::new(self, other)
    }

    /// This region translated by a vector.
    fn offset(&self, offset: HexPoint) -> OffsetRegion<'_>
    where
        Self: Sized,
    {
        OffsetRegion::new(self, offset)
    }
}

impl<T: Region> RegionExt for T {}

/// Every point in either operand.
pub struct UnionRegion<'a> {
    a: &'a dyn Region,
    b: &'a dyn Region,
}

impl<'a> UnionRegion<'a> {
    pub fn new(a: &'a dyn Region, b: &'a dyn Region) -> Self {
        Self { a, b }
    }
}

impl Region for UnionRegion<'_> {
    fn count(&self) -> Result<usize, HexError> {
        Ok(self.points().count())
    }

    fn contains(&self, point: HexPoint) -> Result<bool, HexError> {
        Ok(self.a.contains(point)? || self.b.contains(point)?)
    }

    fn max_in_direction(
        &self,
        direction: Direction,
    ) -> Result<i32, HexError> {
        Ok(self
            .a
            .max_in_direction(direction)?
            .max(self.b.max_in_direction(direction)?))
    }

    /// All of `a`, then the points of `b` not already seen in `a`.
    fn points(&self) -> Box<dyn Iterator<Item = HexPoint> + '_> {
        let seen: HexPointSet = self.a.points().collect();
        Box::new(
            self.a
                .points()
                .chain(self.b.points().filter(move |p| !seen.contains(p))),
        )
    }
}

/// The points present in both operands.
pub struct IntersectRegion<'a> {
    a: &'a dyn Region,
    b: &'a dyn Region,
}

impl<'a> IntersectRegion<'a> {
    pub fn new(a: &'a dyn Region, b: &'a dyn Region) -> Self {
        Self { a, b }
    }
}

impl Region for IntersectRegion<'_> {
    fn count(&self) -> Result<usize, HexError> {
        Ok(self.points().count())
    }

    fn contains(&self, point: HexPoint) -> Result<bool, HexError> {
        Ok(self.a.contains(point)? && self.b.contains(point)?)
    }

    fn max_in_direction(
        &self,
        _direction: Direction,
    ) -> Result<i32, HexError> {
        // The bound of an intersection isn't derivable from the operand
        // bounds (the extremes may not survive the intersection)
        Err(HexError::UnsupportedBound {
            combinator: "intersection",
        })
    }

    /// The points of `a`, in `a`'s order, filtered by membership in `b`.
    fn points(&self) -> Box<dyn Iterator<Item = HexPoint> + '_> {
        let b: HexPointSet = self.b.points().collect();
        Box::new(self.a.points().filter(move |p| b.contains(p)))
    }
}

/// The points of the first operand not present in the second.
pub struct SubtractRegion<'a> {
    a: &'a dyn Region,
    b: &'a dyn Region,
}

impl<'a> SubtractRegion<'a> {
    pub fn new(a: &'a dyn Region, b: &'a dyn Region) -> Self {
        Self { a, b }
    }
}

impl Region for SubtractRegion<'_> {
    fn count(&self) -> Result<usize, HexError> {
        Ok(self.points().count())
    }

    fn contains(&self, point: HexPoint) -> Result<bool, HexError> {
        Ok(self.a.contains(point)? && !self.b.contains(point)?)
    }

    fn max_in_direction(
        &self,
        _direction: Direction,
    ) -> Result<i32, HexError> {
        Err(HexError::UnsupportedBound {
            combinator: "subtraction",
        })
    }

    /// The points of `a`, in `a`'s order, minus those in `b`.
    fn points(&self) -> Box<dyn Iterator<Item = HexPoint> + '_> {
        let b: HexPointSet = self.b.points().collect();
        Box::new(self.a.points().filter(move |p| !b.contains(p)))
    }
}

/// A region translated by a fixed vector.
pub struct OffsetRegion<'a> {
    base: &'a dyn Region,
    offset: HexPoint,
}

impl<'a> OffsetRegion<'a> {
    pub fn new(base: &'a dyn Region, offset: HexPoint) -> Self {
        Self { base, offset }
    }
}

impl Region for OffsetRegion<'_> {
    fn count(&self) -> Result<usize, HexError> {
        self.base.count()
    }

    fn contains(&self, point: HexPoint) -> Result<bool, HexError> {
        self.base.contains(point - self.offset)
    }

    fn max_in_direction(
        &self,
        direction: Direction,
    ) -> Result<i32, HexError> {
        // Saturating keeps the empty-region sentinel from wrapping
        Ok(self
            .base
            .max_in_direction(direction)?
            .saturating_add(self.offset.in_direction(direction)))
    }

    /// The base region's points, in the base's order, each translated.
    fn points(&self) -> Box<dyn Iterator<Item = HexPoint> + '_> {
        Box::new(self.base.points().map(move |p| p + self.offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::SetRegion;

    fn set(points: &[HexPoint]) -> SetRegion {
        points.iter().copied().collect()
    }

    #[test]
    fn test_union() {
        let a = set(&[HexPoint::new(0, 0, 0), HexPoint::new(1, 0, 0)]);
        let b = set(&[HexPoint::new(1, 0, 0), HexPoint::new(0, 1, 0)]);
        let union = a.union(&b);

        assert_eq!(union.count().unwrap(), 3);
        assert!(union.contains(HexPoint::new(0, 1, 0)).unwrap());
        assert!(!union.contains(HexPoint::new(0, 0, 1)).unwrap());
        // No duplicates in the enumeration
        assert_eq!(union.points().count(), 3);
        assert_eq!(
            union.max_in_direction(Direction::Right).unwrap(),
            1
        );
    }

    #[test]
    fn test_intersect() {
        let a = set(&[HexPoint::new(0, 0, 0), HexPoint::new(1, 0, 0)]);
        let b = set(&[HexPoint::new(1, 0, 0), HexPoint::new(0, 1, 0)]);
        let intersection = a.intersect(&b);

        assert_eq!(intersection.count().unwrap(), 1);
        assert!(intersection.contains(HexPoint::new(1, 0, 0)).unwrap());
        assert!(!intersection.contains(HexPoint::ORIGIN).unwrap());
        assert_eq!(
            intersection.max_in_direction(Direction::Right),
            Err(HexError::UnsupportedBound {
                combinator: "intersection"
            })
        );
    }

    #[test]
    fn test_subtract() {
        let a = set(&[HexPoint::new(0, 0, 0), HexPoint::new(1, 0, 0)]);
        let b = set(&[HexPoint::new(1, 0, 0)]);
        let difference = a.subtract(&b);

        assert_eq!(difference.count().unwrap(), 1);
        assert!(difference.contains(HexPoint::ORIGIN).unwrap());
        assert!(!difference.contains(HexPoint::new(1, 0, 0)).unwrap());
    }

    #[test]
    fn test_offset() {
        let base = set(&[HexPoint::ORIGIN, HexPoint::new(1, 0, 0)]);
        let offset = base.offset(HexPoint::new(0, 2, 0));

        assert_eq!(offset.count().unwrap(), 2);
        assert!(offset.contains(HexPoint::new(0, 2, 0)).unwrap());
        assert!(offset.contains(HexPoint::new(1, 2, 0)).unwrap());
        assert!(!offset.contains(HexPoint::ORIGIN).unwrap());
        assert_eq!(offset.max_in_direction(Direction::Up).unwrap(), 2);
    }

    #[test]
    fn test_combinators_alias_their_operands() {
        let mut a = set(&[HexPoint::ORIGIN]);
        let b = set(&[HexPoint::new(1, 0, 0)]);
        {
            let union = a.union(&b);
            assert_eq!(union.count().unwrap(), 2);
        }
        // Mutating the operand changes what the combinator sees next time
        a.insert(HexPoint::new(0, 1, 0));
        {
            let union = a.union(&b);
            assert_eq!(union.count().unwrap(), 3);
        }
        // ...but a materialized snapshot is stable
        let snapshot = a.union(&b).materialize();
        a.insert(HexPoint::new(0, 0, 5));
        assert_eq!(snapshot.len(), 3);
    }

    #[test]
    fn test_nested_combinators() {
        let a = set(&[
            HexPoint::new(0, 0, 0),
            HexPoint::new(1, 0, 0),
            HexPoint::new(2, 0, 0),
        ]);
        let b = set(&[HexPoint::new(1, 0, 0)]);
        let c = set(&[HexPoint::new(0, 1, 0)]);
        let without_b = a.subtract(&b);
        let composed = without_b.union(&c);

        assert_eq!(composed.count().unwrap(), 3);
        assert!(composed.contains(HexPoint::new(2, 0, 0)).unwrap());
        assert!(!composed.contains(HexPoint::new(1, 0, 0)).unwrap());
        assert!(composed.contains(HexPoint::new(0, 1, 0)).unwrap());
    }
}
