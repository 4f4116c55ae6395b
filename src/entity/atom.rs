//! Atoms - discrete resource units with a flavour

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::types::{AtomId, GridCoord, MechId};

/// Flavour of an atom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AtomKind {
    Vanilla,
    Hazelnut,
    Chocolate,
    Truffle,
    Saffron,
    Turtle,
    Sandglass,
    Wilted,
}

impl AtomKind {
    pub const ALL: [AtomKind; 8] = [
        AtomKind::Vanilla,
        AtomKind::Hazelnut,
        AtomKind::Chocolate,
        AtomKind::Truffle,
        AtomKind::Saffron,
        AtomKind::Turtle,
        AtomKind::Sandglass,
        AtomKind::Wilted,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AtomKind::Vanilla => "vanilla",
            AtomKind::Hazelnut => "hazelnut",
            AtomKind::Chocolate => "chocolate",
            AtomKind::Truffle => "truffle",
            AtomKind::Saffron => "saffron",
            AtomKind::Turtle => "turtle",
            AtomKind::Sandglass => "sandglass",
            AtomKind::Wilted => "wilted",
        }
    }
}

impl fmt::Display for AtomKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AtomKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        AtomKind::ALL
            .into_iter()
            .find(|k| k.name() == lower)
            .ok_or_else(|| format!("unknown atom kind '{}'", s))
    }
}

/// Lifecycle of an atom
///
/// `Consumed` and `Delivered` are terminal: the atom stays in the record but
/// never moves or changes status again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AtomStatus {
    Free,
    Possessed,
    Consumed,
    Delivered,
}

impl AtomStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, AtomStatus::Consumed | AtomStatus::Delivered)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Atom {
    pub id: AtomId,
    pub kind: AtomKind,
    pub status: AtomStatus,
    pub position: GridCoord,
    pub possessed_by: Option<MechId>,
}

impl Atom {
    /// A free atom lying on `position`
    pub fn free(id: AtomId, kind: AtomKind, position: GridCoord) -> Self {
        Self {
            id,
            kind,
            status: AtomStatus::Free,
            position,
            possessed_by: None,
        }
    }

    #[inline]
    pub fn is_free_at(&self, cell: GridCoord) -> bool {
        self.status == AtomStatus::Free && self.position == cell
    }

    #[inline]
    pub fn is_held_by(&self, mech: MechId) -> bool {
        self.status == AtomStatus::Possessed && self.possessed_by == Some(mech)
    }
}
