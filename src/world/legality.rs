//! Placement legality - checks a caller runs before simulating
//!
//! The engine tolerates any board, treating malformed operators as inert.
//! This checker is for puzzle front-ends that want to reject a submission
//! outright instead.

use ahash::AHashSet;
use thiserror::Error;

use crate::core::config::Constraints;
use crate::core::types::{GridCoord, MechId};
use crate::entity::{Mech, OperatorKind};
use crate::simulation::instruction::Program;
use crate::world::board::BoardConfig;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("operator {index} ({kind}) has cell {cell} outside a {dimension}x{dimension} board")]
    OperatorOutOfBounds {
        index: usize,
        kind: OperatorKind,
        cell: GridCoord,
        dimension: u32,
    },

    #[error("operator {index} ({kind}) cells {from} and {to} are not adjacent")]
    OperatorNotContiguous {
        index: usize,
        kind: OperatorKind,
        from: GridCoord,
        to: GridCoord,
    },

    #[error("operator {index} ({kind}) needs {expected_in} inputs and {expected_out} outputs, got {got_in} and {got_out}")]
    OperatorArity {
        index: usize,
        kind: OperatorKind,
        expected_in: usize,
        expected_out: usize,
        got_in: usize,
        got_out: usize,
    },

    #[error("cell {0} is claimed by more than one operator, faucet or sink")]
    OverlappingCell(GridCoord),

    #[error("{mech} starts at {cell}, outside the board")]
    MechOutOfBounds { mech: MechId, cell: GridCoord },

    #[error("{got} mechs exceeds the limit of {max}")]
    TooManyMechs { got: usize, max: usize },

    #[error("{got} operators exceeds the limit of {max}")]
    TooManyOperators { got: usize, max: usize },

    #[error("{mech} program has {got} instructions, limit is {max}")]
    ProgramTooLong { mech: MechId, got: usize, max: usize },

    #[error("{mechs} mechs but {programs} programs")]
    ProgramCountMismatch { mechs: usize, programs: usize },
}

/// Check operator placement only: bounds, arity, contiguity, global uniqueness
pub fn check_operators(board: &BoardConfig) -> Result<(), PlacementError> {
    for (index, operator) in board.operators.iter().enumerate() {
        let kind = operator.kind;
        if !operator.matches_arity() {
            let recipe = kind.recipe();
            return Err(PlacementError::OperatorArity {
                index,
                kind,
                expected_in: recipe.inputs.len(),
                expected_out: recipe.outputs.len(),
                got_in: operator.input.len(),
                got_out: operator.output.len(),
            });
        }

        if let Some(cell) = operator.cells().find(|c| !c.in_bounds(board.dimension)) {
            return Err(PlacementError::OperatorOutOfBounds {
                index,
                kind,
                cell: *cell,
                dimension: board.dimension,
            });
        }

        let path: Vec<&GridCoord> = operator.cells().collect();
        for pair in path.windows(2) {
            if !pair[0].is_neighbor(pair[1]) {
                return Err(PlacementError::OperatorNotContiguous {
                    index,
                    kind,
                    from: *pair[0],
                    to: *pair[1],
                });
            }
        }
    }

    let mut claimed: AHashSet<GridCoord> = AHashSet::new();
    let operator_cells = board.operators.iter().flat_map(|o| o.cells().copied());
    let faucet_cells = board.faucets.iter().map(|f| f.position);
    let sink_cells = board.sinks.iter().map(|s| s.position);
    for cell in operator_cells.chain(faucet_cells).chain(sink_cells) {
        if !claimed.insert(cell) {
            return Err(PlacementError::OverlappingCell(cell));
        }
    }

    Ok(())
}

/// Check a full submission: operators, mech start cells and program sizes
pub fn check_board(
    board: &BoardConfig,
    mechs: &[Mech],
    programs: &[Program],
    constraints: &Constraints,
) -> Result<(), PlacementError> {
    if mechs.len() > constraints.max_mechs {
        return Err(PlacementError::TooManyMechs {
            got: mechs.len(),
            max: constraints.max_mechs,
        });
    }
    if board.operators.len() > constraints.max_operators {
        return Err(PlacementError::TooManyOperators {
            got: board.operators.len(),
            max: constraints.max_operators,
        });
    }
    if mechs.len() != programs.len() {
        return Err(PlacementError::ProgramCountMismatch {
            mechs: mechs.len(),
            programs: programs.len(),
        });
    }

    check_operators(board)?;

    for (mech, program) in mechs.iter().zip(programs) {
        if !mech.position.in_bounds(board.dimension) {
            return Err(PlacementError::MechOutOfBounds {
                mech: mech.id,
                cell: mech.position,
            });
        }
        if program.len() > constraints.program_size_max {
            return Err(PlacementError::ProgramTooLong {
                mech: mech.id,
                got: program.len(),
                max: constraints.program_size_max,
            });
        }
    }

    Ok(())
}
