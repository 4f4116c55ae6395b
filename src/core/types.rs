//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use std::fmt;

/// Simulation cycle counter
pub type Cycle = u64;

/// Accumulated cost unit
pub type Cost = u64;

/// Cell on the square board, 0-indexed
///
/// Signed so that malformed caller coordinates are representable; they are
/// simply out of bounds.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct GridCoord {
    pub x: i32,
    pub y: i32,
}

impl GridCoord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// True if the cell lies on a `dimension` x `dimension` board
    #[inline]
    pub fn in_bounds(&self, dimension: u32) -> bool {
        let dim = dimension as i64;
        (0..dim).contains(&(self.x as i64)) && (0..dim).contains(&(self.y as i64))
    }

    /// True if the two cells share an edge (4-neighbourhood)
    #[inline]
    pub fn is_neighbor(&self, other: &Self) -> bool {
        let dx = (self.x as i64 - other.x as i64).abs();
        let dy = (self.y as i64 - other.y as i64).abs();
        dx + dy == 1
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

impl From<(i32, i32)> for GridCoord {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for GridCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// Stable identifier for a mech, displayed as `mech<N>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MechId(pub u32);

impl fmt::Display for MechId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mech{}", self.0)
    }
}

/// Identifier for an atom, displayed as `atom<N>`
///
/// Atoms created during a run take `N = number of atoms already recorded`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AtomId(pub u32);

impl fmt::Display for AtomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "atom{}", self.0)
    }
}
