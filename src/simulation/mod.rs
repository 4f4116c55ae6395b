pub mod cycle;
pub mod driver;
pub mod frame;
pub mod instruction;
pub mod interpreter;
pub mod occupancy;
pub mod reaction;
pub mod summary;

pub use cycle::run_cycle;
pub use driver::{base_cost, simulate, simulate_with_costs};
pub use frame::{Frame, WorkingSet};
pub use instruction::{Instruction, Program, ProgramError};
pub use interpreter::{execute, Outcome};
pub use occupancy::Occupancy;
pub use reaction::{react, run_operators, ReactionOutcome};
pub use summary::RunSummary;
