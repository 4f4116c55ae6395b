//! Static board configuration shared read-only by every cycle

use serde::{Deserialize, Serialize};

use crate::entity::{Faucet, Operator, Sink};

/// Everything about the board that does not change during a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Side length of the square board
    pub dimension: u32,
    #[serde(default)]
    pub faucets: Vec<Faucet>,
    #[serde(default)]
    pub sinks: Vec<Sink>,
    /// Evaluated in this order every cycle
    #[serde(default)]
    pub operators: Vec<Operator>,
}

impl BoardConfig {
    /// An empty board of the given size
    pub fn new(dimension: u32) -> Self {
        Self {
            dimension,
            ..Default::default()
        }
    }

    pub fn with_faucet(mut self, faucet: Faucet) -> Self {
        self.faucets.push(faucet);
        self
    }

    pub fn with_sink(mut self, sink: Sink) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn with_operator(mut self, operator: Operator) -> Self {
        self.operators.push(operator);
        self
    }
}
