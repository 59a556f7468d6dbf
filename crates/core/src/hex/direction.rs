//! The six unit directions of the hex grid and their rotational order.

use crate::hex::HexPoint;
use serde::{Deserialize, Serialize};
use strum::EnumIter;

/// One of the six directions a hex grid lines up along. Each direction is a
/// unit vector: `Right`/`Left` along the x axis, `Up`/`Down` along y, and
/// `Forward`/`Backwards` along z. The declaration order is the
/// counterclockwise rotational order starting from `Right`, and iterating
/// the enum visits the directions in that order.
#[derive(
    Copy,
    Clone,
    Debug,
    EnumIter,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// +x
    Right,
    /// +z
    Forward,
    /// +y
    Up,
    /// -x
    Left,
    /// -z
    Backwards,
    /// -y
    Down,
}

impl Direction {
    /// All six directions in counterclockwise rotational order, starting
    /// from `Right`. Rotating through this list by one step in either
    /// direction cycles through all six exactly once.
    pub const COUNTER_CLOCKWISE: [Self; 6] = [
        Self::Right,
        Self::Forward,
        Self::Up,
        Self::Left,
        Self::Backwards,
        Self::Down,
    ];

    /// The unit vector for this direction. Always minimized.
    pub fn to_point(self) -> HexPoint {
        match self {
            Self::Right => HexPoint::new(1, 0, 0),
            Self::Left => HexPoint::new(-1, 0, 0),
            Self::Up => HexPoint::new(0, 1, 0),
            Self::Down => HexPoint::new(0, -1, 0),
            Self::Forward => HexPoint::new(0, 0, 1),
            Self::Backwards => HexPoint::new(0, 0, -1),
        }
    }

    /// Get the index of this direction within the counterclockwise ordering
    pub fn ccw_index(self) -> usize {
        Self::COUNTER_CLOCKWISE
            .iter()
            .position(|dir| self == *dir)
            .unwrap()
    }

    /// Get the direction directly opposite this one
    pub fn opposite(self) -> Self {
        self.rotated_ccw(3)
    }

    /// Get the direction `steps` counterclockwise turns from this one
    pub fn rotated_ccw(self, steps: usize) -> Self {
        Self::COUNTER_CLOCKWISE[(self.ccw_index() + steps) % 6]
    }

    /// Get the direction `steps` clockwise turns from this one
    pub fn rotated_cw(self, steps: usize) -> Self {
        // Adding the complement avoids underflow on the index math
        self.rotated_ccw(6 - (steps % 6))
    }

    /// An infinite cyclic sequence of the six directions, counterclockwise,
    /// starting at `start`. Every ring- and wedge-walking enumerator is
    /// driven by one of these.
    pub fn ccw_from(start: Self) -> impl Iterator<Item = Self> {
        Self::COUNTER_CLOCKWISE
            .iter()
            .copied()
            .cycle()
            .skip(start.ccw_index())
    }

    /// An infinite cyclic sequence of the six directions, clockwise,
    /// starting at `start`.
    pub fn cw_from(start: Self) -> impl Iterator<Item = Self> {
        Self::COUNTER_CLOCKWISE
            .iter()
            .rev()
            .copied()
            .cycle()
            .skip(5 - start.ccw_index())
    }
}
