//! Frames - immutable snapshots of the world, one per cycle
//!
//! A run produces `n_cycles + 1` frames. Each cycle starts a `WorkingSet`
//! copied field by field out of the previous frame, mutates only that, and
//! seals it into a new frame. Frames are never touched after they are built.

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

use crate::core::types::{AtomId, Cost, Cycle, GridCoord, MechId};
use crate::entity::{Atom, AtomKind, AtomStatus, Mech};
use crate::simulation::occupancy::Occupancy;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    /// 0 for the initial state, k after k cycles
    pub cycle: Cycle,
    pub mechs: Vec<Mech>,
    /// Append-only across frames; terminal atoms stay for the record
    pub atoms: Vec<Atom>,
    pub occupancy: Occupancy,
    /// Flavours that reached a sink, in delivery order
    pub delivered: Vec<AtomKind>,
    /// Base placement cost plus every per-cycle charge so far
    pub cost: Cost,
    /// Human-readable trace of what happened during the cycle
    pub notes: String,
    /// Operator inputs consumed this cycle, in firing order
    pub consumed_atom_ids: Vec<AtomId>,
    /// Operator outputs created this cycle, in firing order
    pub produced_atom_ids: Vec<AtomId>,
}

impl Frame {
    /// Frame 0: the caller's entities with occupancy replayed from free atoms
    pub fn initial(mechs: Vec<Mech>, atoms: Vec<Atom>, dimension: u32, base_cost: Cost) -> Self {
        let occupancy = Occupancy::rebuild(dimension, &atoms);
        Self {
            cycle: 0,
            mechs,
            atoms,
            occupancy,
            delivered: Vec::new(),
            cost: base_cost,
            notes: String::new(),
            consumed_atom_ids: Vec::new(),
            produced_atom_ids: Vec::new(),
        }
    }

    pub fn atom(&self, id: AtomId) -> Option<&Atom> {
        self.atoms.iter().find(|a| a.id == id)
    }

    pub fn mech(&self, id: MechId) -> Option<&Mech> {
        self.mechs.iter().find(|m| m.id == id)
    }

    /// The free atom lying on `cell`, if any
    pub fn free_atom_at(&self, cell: GridCoord) -> Option<&Atom> {
        self.atoms.iter().find(|a| a.is_free_at(cell))
    }

    pub fn count_with_status(&self, status: AtomStatus) -> usize {
        self.atoms.iter().filter(|a| a.status == status).count()
    }
}

/// Mutable state threaded through the phases of one cycle
#[derive(Debug, Clone)]
pub struct WorkingSet {
    pub atoms: Vec<Atom>,
    pub occupancy: Occupancy,
    pub delivered: Vec<AtomKind>,
    pub cost: Cost,
    pub notes: String,
    pub consumed_atom_ids: Vec<AtomId>,
    pub produced_atom_ids: Vec<AtomId>,
    /// Next id handed out by `spawn_atom`
    next_atom_id: u32,
}

impl WorkingSet {
    /// Start a cycle from the previous frame
    pub fn from_frame(frame: &Frame) -> Self {
        Self {
            atoms: frame.atoms.clone(),
            occupancy: frame.occupancy.clone(),
            delivered: frame.delivered.clone(),
            cost: frame.cost,
            notes: String::new(),
            consumed_atom_ids: Vec::new(),
            produced_atom_ids: Vec::new(),
            next_atom_id: frame.atoms.len() as u32,
        }
    }

    /// Seal the cycle into a new frame
    pub fn into_frame(self, cycle: Cycle, mechs: Vec<Mech>) -> Frame {
        Frame {
            cycle,
            mechs,
            atoms: self.atoms,
            occupancy: self.occupancy,
            delivered: self.delivered,
            cost: self.cost,
            notes: self.notes,
            consumed_atom_ids: self.consumed_atom_ids,
            produced_atom_ids: self.produced_atom_ids,
        }
    }

    /// Append a free atom at `cell` and flag the cell
    pub fn spawn_atom(&mut self, kind: AtomKind, cell: GridCoord) -> AtomId {
        let id = AtomId(self.next_atom_id);
        self.next_atom_id += 1;
        self.atoms.push(Atom::free(id, kind, cell));
        self.occupancy.fill(cell);
        id
    }

    /// Index of the free atom lying on `cell`
    pub fn free_atom_at(&self, cell: GridCoord) -> Option<usize> {
        self.atoms.iter().position(|a| a.is_free_at(cell))
    }

    /// Index of the atom held by `mech`
    pub fn held_atom(&self, mech: MechId) -> Option<usize> {
        self.atoms.iter().position(|a| a.is_held_by(mech))
    }

    pub fn charge(&mut self, amount: Cost) {
        self.cost = self.cost.saturating_add(amount);
    }

    pub fn note(&mut self, args: std::fmt::Arguments<'_>) {
        // Writing into a String cannot fail
        let _ = self.notes.write_fmt(args);
        self.notes.push_str("; ");
    }
}
