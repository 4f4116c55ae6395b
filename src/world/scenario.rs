//! TOML schema types for scenario files
//!
//! A scenario file describes one puzzle submission: the board, the mechs
//! with their programs, and optionally atoms already lying on the board.
//! Kinds are kept as strings here and resolved by the loader so a typo
//! reports which entry it came from.

use serde::{Deserialize, Serialize};

use crate::core::types::Cycle;
use crate::entity::{Atom, Mech, MechStatus};
use crate::simulation::instruction::Program;
use crate::world::board::BoardConfig;

/// Cycles to run when neither the file nor the caller says otherwise
pub const DEFAULT_CYCLES: Cycle = 100;

/// Root structure for scenario TOML files
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScenarioFile {
    /// Human-readable puzzle name
    #[serde(default)]
    pub name: Option<String>,
    /// Side length of the square board
    pub dimension: u32,
    /// Cycles to simulate
    #[serde(default)]
    pub cycles: Option<Cycle>,
    #[serde(default)]
    pub faucets: Vec<FaucetEntry>,
    #[serde(default)]
    pub sinks: Vec<SinkEntry>,
    /// Evaluated in file order every cycle
    #[serde(default)]
    pub operators: Vec<OperatorEntry>,
    /// Mech order is execution order
    #[serde(default)]
    pub mechs: Vec<MechEntry>,
    #[serde(default)]
    pub atoms: Vec<AtomEntry>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FaucetEntry {
    /// Defaults to `faucet<N>` by position in the file
    #[serde(default)]
    pub id: Option<String>,
    pub position: [i32; 2],
    /// Atom flavour name, e.g. "vanilla"
    pub kind: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SinkEntry {
    /// Defaults to `sink<N>` by position in the file
    #[serde(default)]
    pub id: Option<String>,
    pub position: [i32; 2],
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OperatorEntry {
    /// Operator name ("stir") or glyph ("&")
    pub kind: String,
    pub input: Vec<[i32; 2]>,
    pub output: Vec<[i32; 2]>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MechEntry {
    pub position: [i32; 2],
    #[serde(default)]
    pub status: Option<MechStatus>,
    /// Comma-separated instruction tape, e.g. "d,z,a,x"
    #[serde(default)]
    pub program: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AtomEntry {
    pub kind: String,
    pub position: [i32; 2],
    /// Index of the mech holding this atom; the atom then starts at that
    /// mech's position and the mech starts closed
    #[serde(default)]
    pub held_by: Option<usize>,
}

/// A fully resolved scenario, ready to simulate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    pub name: String,
    pub cycles: Cycle,
    pub(crate) board: BoardConfig,
    pub(crate) mechs: Vec<Mech>,
    pub(crate) atoms: Vec<Atom>,
    pub(crate) programs: Vec<Program>,
}

impl Scenario {
    pub fn board(&self) -> &BoardConfig {
        &self.board
    }

    /// Mechs as they stand before cycle 1
    pub fn initial_mechs(&self) -> Vec<Mech> {
        self.mechs.clone()
    }

    /// Atoms as they lie before cycle 1, ids `atom0..`
    pub fn initial_atoms(&self) -> Vec<Atom> {
        self.atoms.clone()
    }

    /// One program per mech, index-aligned with `initial_mechs`
    pub fn programs(&self) -> &[Program] {
        &self.programs
    }

    pub fn mech_count(&self) -> usize {
        self.mechs.len()
    }
}
