//! Mechworks - deterministic grid simulation of mechs, atoms and operators
//!
//! Mechs run looping instruction tapes on a square board, carrying atoms
//! between faucets, operators and sinks. `simulation::simulate` folds the
//! cycle step into the full frame sequence of a run.

pub mod core;
pub mod entity;
pub mod simulation;
pub mod spatial;
pub mod world;

pub use simulation::{simulate, simulate_with_costs, Frame};
