//! Run summary - what a scoring layer reads off the final frame

use ahash::AHashMap;
use serde::Serialize;
use std::fmt;

use crate::core::types::{Cost, Cycle};
use crate::entity::{AtomKind, AtomStatus};
use crate::simulation::frame::Frame;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub cycles: Cycle,
    pub final_cost: Cost,
    pub delivered_total: usize,
    /// Per-flavour delivery count, sorted by flavour
    pub delivered_by_kind: Vec<(AtomKind, usize)>,
    pub atoms_created: usize,
    pub atoms_consumed: usize,
}

impl RunSummary {
    /// Summarise a frame sequence; `None` for an empty run
    pub fn from_frames(frames: &[Frame]) -> Option<Self> {
        let first = frames.first()?;
        let last = frames.last()?;

        let mut tally: AHashMap<AtomKind, usize> = AHashMap::new();
        for kind in &last.delivered {
            *tally.entry(*kind).or_insert(0) += 1;
        }
        let mut delivered_by_kind: Vec<_> = tally.into_iter().collect();
        delivered_by_kind.sort_unstable();

        Some(Self {
            cycles: last.cycle,
            final_cost: last.cost,
            delivered_total: last.delivered.len(),
            delivered_by_kind,
            atoms_created: last.atoms.len().saturating_sub(first.atoms.len()),
            atoms_consumed: last.count_with_status(AtomStatus::Consumed),
        })
    }

    pub fn delivered(&self, kind: AtomKind) -> usize {
        self.delivered_by_kind
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "cycles:    {}", self.cycles)?;
        writeln!(f, "cost:      {}", self.final_cost)?;
        writeln!(f, "delivered: {}", self.delivered_total)?;
        for (kind, count) in &self.delivered_by_kind {
            writeln!(f, "  {:<10} {}", kind, count)?;
        }
        writeln!(f, "created:   {}", self.atoms_created)?;
        write!(f, "consumed:  {}", self.atoms_consumed)
    }
}
