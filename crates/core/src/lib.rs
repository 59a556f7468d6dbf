//! Hexgrid is a spatial reasoning library for hexagon-tiled worlds:
//! cube-style coordinates, composable geometric regions, and best-first
//! pathfinding over them. It answers three questions for gameplay code:
//! which cells are in this shape, is this cell one of them, and what's
//! the cheapest route between these cells given these constraints.
//!
//! ```
//! use hexgrid::{HexPoint, HexagonRegion, PathQuery, Region};
//!
//! // A disk of obstacles sitting on the straight-line route
//! let wall = HexagonRegion::new(1, HexPoint::new(2, 0, 0)).unwrap();
//!
//! let path = PathQuery::new(12)
//!     .disallowed(&wall)
//!     .find_point(HexPoint::ORIGIN, HexPoint::new(4, 0, 0))
//!     .unwrap()
//!     .expect("a detour exists");
//! assert!(path.total_distance() > 4);
//! assert!(!wall.contains(path.destination()).unwrap());
//! ```
//!
//! Everything is synchronous and single-threaded; "lazy" here means
//! on-demand enumeration, not concurrency. See [hex] for the coordinate
//! system, [region] for the shape catalog, and [path] for the search
//! engine.

pub mod error;
pub mod hex;
pub mod line;
pub mod path;
pub mod region;

pub use crate::{
    error::HexError,
    hex::{
        Direction, HexPoint, HexPointIndexMap, HexPointIndexSet,
        HexPointMap, HexPointSet,
    },
    line::{HexLine, LinePoint},
    path::{
        AStarKey, AStarSearch, HexPath, PathQuery, ReachableRegion,
        Stretch,
    },
    region::{
        flood::{BfsRegion, ExpandRegion},
        shape::{
            AdjacentRegion, HexagonRegion, PointRegion, RayRegion,
            RectRegion, RingRegion, StarRegion, WedgeRegion,
        },
        EmptyRegion, IntersectRegion, OffsetRegion, Region, RegionExt,
        SetRegion, SubtractRegion, UnionRegion,
    },
};
