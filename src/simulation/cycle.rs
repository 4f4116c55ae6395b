//! Cycle step - one discrete state transition
//!
//! Phases run in a fixed order, each observing the previous one's changes:
//! 1. Faucets refill their empty cells
//! 2. Mechs execute their current instruction, in array order
//! 3. Operators react, in board order
//! 4. Sinks deliver free atoms lying on them

use crate::core::config::CostTable;
use crate::entity::{AtomStatus, Mech};
use crate::simulation::frame::{Frame, WorkingSet};
use crate::simulation::instruction::{Instruction, Program};
use crate::simulation::interpreter::execute;
use crate::simulation::reaction::{run_operators, ReactionOutcome};
use crate::world::board::BoardConfig;

/// Advance the world one cycle, producing the next frame
///
/// `programs` is index-aligned with `frame.mechs`; a mech without a program
/// idles.
pub fn run_cycle(
    frame: &Frame,
    programs: &[Program],
    board: &BoardConfig,
    costs: &CostTable,
) -> Frame {
    let dimension = board.dimension;
    let dynamic = &costs.dynamic_costs;
    let mut state = WorkingSet::from_frame(frame);

    replenish_faucets(board, &mut state);

    let mut mechs: Vec<Mech> = Vec::with_capacity(frame.mechs.len());
    for (i, mech) in frame.mechs.iter().enumerate() {
        let instruction = programs
            .get(i)
            .map(|p| p.instruction_at(mech.pc))
            .unwrap_or(Instruction::Noop);
        let (next, outcome) = execute(instruction, mech, &mut state, dimension, dynamic);
        state.note(format_args!("{} {}: {}", mech.id, instruction, outcome));
        mechs.push(next);
    }

    let reactions = run_operators(&board.operators, &mut state, dimension, dynamic);

    let delivered_before = state.delivered.len();
    deliver_to_sinks(board, &mut state);

    let cycle = frame.cycle + 1;
    tracing::debug!(
        cycle,
        fired = reactions.iter().filter(|r| **r == ReactionOutcome::Fired).count(),
        delivered = state.delivered.len() - delivered_before,
        atoms = state.atoms.len(),
        cost = state.cost,
        "cycle complete"
    );

    state.into_frame(cycle, mechs)
}

fn replenish_faucets(board: &BoardConfig, state: &mut WorkingSet) {
    for faucet in &board.faucets {
        // Off-board faucets have no cell to fill
        if !faucet.position.in_bounds(board.dimension) {
            continue;
        }
        if !state.occupancy.is_populated(faucet.position) {
            let id = state.spawn_atom(faucet.kind, faucet.position);
            tracing::trace!(
                faucet = %faucet.id,
                atom = %id,
                kind = %faucet.kind,
                "faucet replenished"
            );
        }
    }
}

fn deliver_to_sinks(board: &BoardConfig, state: &mut WorkingSet) {
    for sink in &board.sinks {
        let mut delivered_any = false;
        for atom in state.atoms.iter_mut().filter(|a| a.is_free_at(sink.position)) {
            atom.status = AtomStatus::Delivered;
            atom.possessed_by = None;
            state.delivered.push(atom.kind);
            delivered_any = true;
            tracing::trace!(sink = %sink.id, atom = %atom.id, kind = %atom.kind, "atom delivered");
        }
        if delivered_any {
            state.occupancy.clear(sink.position);
        }
    }
}
