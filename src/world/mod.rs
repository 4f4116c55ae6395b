//! Board layout, placement legality and scenario files

pub mod board;
pub mod legality;
pub mod loader;
pub mod scenario;

pub use board::BoardConfig;
pub use legality::{check_board, check_operators, PlacementError};
pub use loader::{LoadError, ScenarioLoader};
pub use scenario::{Scenario, ScenarioFile};
