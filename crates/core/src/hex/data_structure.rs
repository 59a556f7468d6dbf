//! Collection aliases for point-keyed data. All the hash-based collections
//! use the FNV hasher, since the keys are tiny.

use crate::hex::HexPoint;
use fnv::FnvBuildHasher;
use indexmap::{IndexMap, IndexSet};
use std::collections::{HashMap, HashSet};

/// A set of hex points
pub type HexPointSet = HashSet<HexPoint, FnvBuildHasher>;
/// A map of hex points to some `T`
pub type HexPointMap<T> = HashMap<HexPoint, T, FnvBuildHasher>;
/// An ORDERED set of hex points. This has some extra memory overhead, so we
/// should only use it when we actually need the ordering.
pub type HexPointIndexSet = IndexSet<HexPoint, FnvBuildHasher>;
/// An ORDERED map of hex points to some `T`. Same caveat as
/// [HexPointIndexSet].
pub type HexPointIndexMap<T> = IndexMap<HexPoint, T, FnvBuildHasher>;
