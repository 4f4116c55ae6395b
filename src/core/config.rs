//! Cost and constraint configuration with documented constants
//!
//! Every number that feeds the cost ledger lives here. The engine reads a
//! `CostTable` by reference and never consults global state, so two runs with
//! the same table always agree.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::core::types::Cost;
use crate::entity::mech::MechKind;
use crate::entity::operator::OperatorKind;

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("{0}")]
    Invalid(String),
}

/// One-time placement costs, charged when the run starts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaticCosts {
    /// Per singleton mech on the board
    pub singleton: Cost,
    pub stir: Cost,
    pub shake: Cost,
    pub steam: Cost,
    pub smash: Cost,
    pub evolve: Cost,
    pub slow: Cost,
    pub wilt: Cost,
    pub bake: Cost,
}

impl Default for StaticCosts {
    fn default() -> Self {
        Self {
            singleton: 150,
            stir: 150,
            shake: 250,
            steam: 500,
            smash: 700,
            evolve: 900,
            slow: 300,
            wilt: 100,
            bake: 400,
        }
    }
}

/// Per-event costs, charged as the cycles run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DynamicCosts {
    /// Successful step without an atom in hand
    pub move_empty: Cost,
    /// Successful step dragging a held atom along
    ///
    /// Carrying should never be cheaper than walking empty; `validate`
    /// rejects tables that invert the two.
    pub move_carry: Cost,
    pub get: Cost,
    pub put: Cost,
    /// Charged every cycle a blocking instruction stalls the program counter
    pub blocked: Cost,
    /// Charged per operator firing. Zero by default: reactions are paid for
    /// up front through the static operator cost.
    pub operator_fire: Cost,
}

impl Default for DynamicCosts {
    fn default() -> Self {
        Self {
            move_empty: 1,
            move_carry: 2,
            get: 1,
            put: 1,
            blocked: 1,
            operator_fire: 0,
        }
    }
}

/// Complete cost table consulted by the simulation driver
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostTable {
    #[serde(rename = "static")]
    pub static_costs: StaticCosts,
    #[serde(rename = "dynamic")]
    pub dynamic_costs: DynamicCosts,
}

impl CostTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Static cost of placing one mech of the given kind
    pub fn mech_cost(&self, kind: MechKind) -> Cost {
        match kind {
            MechKind::Singleton => self.static_costs.singleton,
        }
    }

    /// Static cost of placing one operator of the given kind
    pub fn operator_cost(&self, kind: OperatorKind) -> Cost {
        let s = &self.static_costs;
        match kind {
            OperatorKind::Stir => s.stir,
            OperatorKind::Shake => s.shake,
            OperatorKind::Steam => s.steam,
            OperatorKind::Smash => s.smash,
            OperatorKind::Evolve => s.evolve,
            OperatorKind::Slow => s.slow,
            OperatorKind::Wilt => s.wilt,
            OperatorKind::Bake => s.bake,
        }
    }

    /// Validate the table for internal consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        let d = &self.dynamic_costs;
        if d.move_carry < d.move_empty {
            return Err(ConfigError::Invalid(format!(
                "move_carry ({}) should be >= move_empty ({})",
                d.move_carry, d.move_empty
            )));
        }
        Ok(())
    }

    /// Parse a cost table from TOML; missing keys fall back to defaults
    pub fn parse_toml(content: &str) -> Result<Self, ConfigError> {
        let table: CostTable = toml::from_str(content)?;
        table.validate()?;
        Ok(table)
    }

    /// Load a cost table from a TOML file
    pub fn load_from_toml(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }
}

/// Limits enforced by the placement-legality checker
///
/// The engine itself never reads these; they describe what a well-formed
/// puzzle submission looks like.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Constraints {
    pub max_mechs: usize,
    pub max_operators: usize,
    /// Maximum instructions per mech program
    pub program_size_max: usize,
}

impl Default for Constraints {
    fn default() -> Self {
        Self {
            max_mechs: 20,
            max_operators: 20,
            program_size_max: 40,
        }
    }
}
