//! Reaction engine - operator firing
//!
//! Operators are evaluated one after another in board order. Each one sees
//! the atoms and occupancy exactly as the mechs and the earlier operators of
//! the same cycle left them, so two operators sharing cells can depend on
//! which is declared first.

use crate::core::config::DynamicCosts;
use crate::entity::{AtomStatus, Operator};
use crate::simulation::frame::WorkingSet;

/// Result of evaluating one operator for one cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReactionOutcome {
    /// Inputs consumed, outputs produced
    Fired,
    /// Some input cell is empty or some output cell is occupied
    NotReady,
    /// Cells are ready but the input flavours do not match the recipe
    Mismatch,
    /// Wrong arity, repeated cells or off-board cells; never fires
    Malformed,
}

/// Evaluate one operator against the working set, firing it if it can
pub fn react(
    operator: &Operator,
    state: &mut WorkingSet,
    dimension: u32,
    costs: &DynamicCosts,
) -> ReactionOutcome {
    if !operator.is_well_formed(dimension) {
        return ReactionOutcome::Malformed;
    }

    let occupancy = &state.occupancy;
    let inputs_full = operator.input.iter().all(|c| occupancy.is_populated(*c));
    let outputs_clear = operator.output.iter().all(|c| !occupancy.is_populated(*c));
    if !(inputs_full && outputs_clear) {
        return ReactionOutcome::NotReady;
    }

    let mut consumed = Vec::with_capacity(operator.input.len());
    for cell in &operator.input {
        match state.free_atom_at(*cell) {
            Some(idx) => consumed.push(idx),
            None => return ReactionOutcome::NotReady,
        }
    }

    let recipe = operator.kind.recipe();
    let kinds_match = consumed
        .iter()
        .map(|&idx| state.atoms[idx].kind)
        .eq(recipe.inputs.iter().copied());
    if !kinds_match {
        return ReactionOutcome::Mismatch;
    }

    for (&idx, cell) in consumed.iter().zip(&operator.input) {
        let atom = &mut state.atoms[idx];
        atom.status = AtomStatus::Consumed;
        atom.possessed_by = None;
        state.consumed_atom_ids.push(atom.id);
        state.occupancy.clear(*cell);
    }
    for (&kind, cell) in recipe.outputs.iter().zip(&operator.output) {
        let id = state.spawn_atom(kind, *cell);
        state.produced_atom_ids.push(id);
    }
    state.charge(costs.operator_fire);

    ReactionOutcome::Fired
}

/// Evaluate every operator in declaration order
pub fn run_operators(
    operators: &[Operator],
    state: &mut WorkingSet,
    dimension: u32,
    costs: &DynamicCosts,
) -> Vec<ReactionOutcome> {
    operators
        .iter()
        .map(|operator| {
            let outcome = react(operator, state, dimension, costs);
            if outcome == ReactionOutcome::Fired {
                state.note(format_args!("{} fired", operator.kind));
            }
            tracing::trace!(operator = %operator.kind, ?outcome, "operator evaluated");
            outcome
        })
        .collect()
}
