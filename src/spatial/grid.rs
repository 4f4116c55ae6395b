//! Board directions and unit steps

use serde::{Deserialize, Serialize};

use crate::core::types::GridCoord;

/// Unit step along one board axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    PosX,
    NegX,
    PosY,
    NegY,
}

impl Direction {
    /// (dx, dy) offset of one step
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::PosX => (1, 0),
            Direction::NegX => (-1, 0),
            Direction::PosY => (0, 1),
            Direction::NegY => (0, -1),
        }
    }

    /// Destination of a step from `from`, or `None` if it would leave the board
    pub fn step(self, from: GridCoord, dimension: u32) -> Option<GridCoord> {
        let (dx, dy) = self.delta();
        let to = from.offset(dx, dy);
        to.in_bounds(dimension).then_some(to)
    }
}
