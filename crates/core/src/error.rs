//! Error types for hex geometry and region queries.
//!
//! Every condition a caller might want to branch on gets its own variant.
//! The pathfinding entry points wrap these in [anyhow::Error], so callers
//! there can recover the variant with `downcast_ref::<HexError>()`.

use crate::hex::Direction;
use std::{error::Error, fmt};

/// An error from a geometric query or a shape constructor.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HexError {
    /// A direction decomposition was requested for the zero vector. No
    /// direction is defined for a null displacement.
    ZeroVector,
    /// A shape was constructed with a radius outside its domain (negative,
    /// or zero where the shape requires at least one ring).
    InvalidRadius { radius: i32 },
    /// A rectangle was constructed with a negative width or height.
    InvalidSize { width: i32, height: i32 },
    /// A wedge was constructed with equal start and end directions. Use a
    /// ray for a single angular slice of zero width.
    DegenerateWedge { direction: Direction },
    /// A rectangle's main and cross axes are parallel, so they can't span
    /// an area.
    ParallelAxes { main: Direction, cross: Direction },
    /// A path stretch must cover at least one hex.
    EmptyStretch,
    /// A flood fill was centered on a point outside its search space.
    CenterOutsideSearchSpace,
    /// `contains`, `count`, or `max_in_direction` was called on a
    /// search-backed region that hasn't been materialized yet. Call
    /// [Region::materialize](crate::region::Region::materialize) first.
    Unmaterialized { operation: &'static str },
    /// The directional bound of this combinator has no closed form. Pay for
    /// a materialization if you need it.
    UnsupportedBound { combinator: &'static str },
}

impl fmt::Display for HexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroVector => {
                write!(f, "the zero vector has no direction")
            }
            Self::InvalidRadius { radius } => {
                write!(f, "invalid radius: {}", radius)
            }
            Self::InvalidSize { width, height } => {
                write!(f, "invalid rectangle size: {}x{}", width, height)
            }
            Self::DegenerateWedge { direction } => {
                write!(
                    f,
                    "wedge start and end are both {:?}; use a ray instead",
                    direction
                )
            }
            Self::ParallelAxes { main, cross } => {
                write!(
                    f,
                    "rectangle axes {:?} and {:?} are parallel",
                    main, cross
                )
            }
            Self::EmptyStretch => {
                write!(f, "path stretches must have a length of at least 1")
            }
            Self::CenterOutsideSearchSpace => {
                write!(f, "flood fill center is not in the search space")
            }
            Self::Unmaterialized { operation } => {
                write!(
                    f,
                    "{} is not supported on an unmaterialized region; \
                     materialize it first",
                    operation
                )
            }
            Self::UnsupportedBound { combinator } => {
                write!(
                    f,
                    "max_in_direction has no closed form for {} regions",
                    combinator
                )
            }
        }
    }
}

impl Error for HexError {}
