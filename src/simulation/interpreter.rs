//! Instruction interpreter
//!
//! Applies one instruction for one mech against the cycle's working set.
//! Every instruction has an explicit failure branch; only the blocking
//! instructions can hold the program counter in place.

use std::fmt;

use crate::core::config::DynamicCosts;
use crate::entity::{AtomStatus, Mech, MechStatus};
use crate::simulation::frame::WorkingSet;
use crate::simulation::instruction::Instruction;
use crate::spatial::grid::Direction;

/// What an instruction did, for the diagnostic trace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Success,
    Fail,
    Blocked,
    NoOp,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Outcome::Success => "success",
            Outcome::Fail => "fail",
            Outcome::Blocked => "blocked",
            Outcome::NoOp => "no-op",
        })
    }
}

/// Execute `instruction` for `mech`, returning the mech's next state
///
/// Atom, occupancy and cost changes are applied to `state` in place so that
/// mechs later in the same cycle observe them.
pub fn execute(
    instruction: Instruction,
    mech: &Mech,
    state: &mut WorkingSet,
    dimension: u32,
    costs: &DynamicCosts,
) -> (Mech, Outcome) {
    let mut next = mech.clone();

    let outcome = match instruction {
        Instruction::Move(direction) => {
            next.pc += 1;
            step(direction, &mut next, state, dimension, costs)
        }
        Instruction::Get => {
            next.pc += 1;
            if next.is_open() && grab(&mut next, state, costs) {
                Outcome::Success
            } else {
                Outcome::Fail
            }
        }
        Instruction::Put => {
            next.pc += 1;
            if !next.is_open() && drop_held(&mut next, state, costs) {
                Outcome::Success
            } else {
                Outcome::Fail
            }
        }
        Instruction::BlockingGet => {
            if !next.is_open() {
                // Already holding: nothing to wait for, and no charge
                next.pc += 1;
                Outcome::NoOp
            } else if grab(&mut next, state, costs) {
                next.pc += 1;
                Outcome::Success
            } else {
                state.charge(costs.blocked);
                Outcome::Blocked
            }
        }
        Instruction::BlockingPut => {
            if next.is_open() {
                next.pc += 1;
                Outcome::NoOp
            } else if state.occupancy.is_populated(next.position) {
                state.charge(costs.blocked);
                Outcome::Blocked
            } else if drop_held(&mut next, state, costs) {
                next.pc += 1;
                Outcome::Success
            } else {
                // Closed gripper with nothing in it: waiting would never help
                next.pc += 1;
                Outcome::Fail
            }
        }
        Instruction::Noop => {
            next.pc += 1;
            Outcome::NoOp
        }
    };

    tracing::trace!(
        mech = %mech.id,
        %instruction,
        %outcome,
        from = %mech.position,
        to = %next.position,
        "instruction executed"
    );

    (next, outcome)
}

fn step(
    direction: Direction,
    mech: &mut Mech,
    state: &mut WorkingSet,
    dimension: u32,
    costs: &DynamicCosts,
) -> Outcome {
    let Some(to) = direction.step(mech.position, dimension) else {
        return Outcome::Fail;
    };
    mech.position = to;

    let mut carried = false;
    for atom in state.atoms.iter_mut().filter(|a| a.is_held_by(mech.id)) {
        atom.position = to;
        carried = true;
    }

    state.charge(if carried {
        costs.move_carry
    } else {
        costs.move_empty
    });
    Outcome::Success
}

/// Pick up the free atom under an open mech; false if there is none
fn grab(mech: &mut Mech, state: &mut WorkingSet, costs: &DynamicCosts) -> bool {
    let cell = mech.position;
    if !state.occupancy.is_populated(cell) {
        return false;
    }
    let Some(idx) = state.free_atom_at(cell) else {
        return false;
    };

    let atom = &mut state.atoms[idx];
    atom.status = AtomStatus::Possessed;
    atom.possessed_by = Some(mech.id);
    state.occupancy.clear(cell);
    mech.status = MechStatus::Close;
    state.charge(costs.get);
    true
}

/// Put the held atom down on an empty cell; false if blocked or empty-handed
fn drop_held(mech: &mut Mech, state: &mut WorkingSet, costs: &DynamicCosts) -> bool {
    let cell = mech.position;
    if state.occupancy.is_populated(cell) {
        return false;
    }
    let Some(idx) = state.held_atom(mech.id) else {
        return false;
    };

    let atom = &mut state.atoms[idx];
    atom.status = AtomStatus::Free;
    atom.possessed_by = None;
    atom.position = cell;
    state.occupancy.fill(cell);
    mech.status = MechStatus::Open;
    state.charge(costs.put);
    true
}
