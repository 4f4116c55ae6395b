pub mod config;
pub mod error;
pub mod types;

pub use config::{Constraints, CostTable};
pub use types::{AtomId, Cost, Cycle, GridCoord, MechId};
