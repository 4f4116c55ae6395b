//! Mechs - programmable actuators that walk the board and carry atoms

use serde::{Deserialize, Serialize};

use crate::core::types::{GridCoord, MechId};

/// Whether the mech's gripper holds an atom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MechStatus {
    /// Empty gripper
    Open,
    /// Holding exactly one atom
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MechKind {
    Singleton,
}

/// State of one mech at a given frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mech {
    pub id: MechId,
    pub position: GridCoord,
    pub status: MechStatus,
    /// Index of the next instruction, taken modulo the program length.
    /// Only ever incremented; blocking instructions may hold it in place.
    pub pc: u64,
    pub kind: MechKind,
}

impl Mech {
    /// A fresh singleton mech: open gripper, program counter at zero
    pub fn new(id: MechId, position: GridCoord) -> Self {
        Self {
            id,
            position,
            status: MechStatus::Open,
            pc: 0,
            kind: MechKind::Singleton,
        }
    }

    pub fn with_status(mut self, status: MechStatus) -> Self {
        self.status = status;
        self
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.status == MechStatus::Open
    }
}
