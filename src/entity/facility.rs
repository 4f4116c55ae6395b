//! Faucets and sinks - static cells that create and absorb atoms

use serde::{Deserialize, Serialize};

use crate::core::types::GridCoord;
use crate::entity::atom::AtomKind;

/// Replenishes one atom of `kind` whenever its cell is empty
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faucet {
    pub id: String,
    pub position: GridCoord,
    pub kind: AtomKind,
}

impl Faucet {
    pub fn new(id: impl Into<String>, position: GridCoord, kind: AtomKind) -> Self {
        Self {
            id: id.into(),
            position,
            kind,
        }
    }
}

/// Delivers any free atom that comes to rest on its cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sink {
    pub id: String,
    pub position: GridCoord,
}

impl Sink {
    pub fn new(id: impl Into<String>, position: GridCoord) -> Self {
        Self {
            id: id.into(),
            position,
        }
    }
}
