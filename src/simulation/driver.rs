//! Simulation driver - folds the cycle step into a frame sequence
//!
//! `simulate` is a pure function of its inputs: no clock, no randomness and
//! no I/O happen inside the fold, so identical inputs always yield identical
//! frames.

use crate::core::config::CostTable;
use crate::core::types::{Cost, Cycle};
use crate::entity::{Atom, Mech};
use crate::simulation::cycle::run_cycle;
use crate::simulation::frame::Frame;
use crate::simulation::instruction::Program;
use crate::world::board::BoardConfig;

/// Upper bound on the frames reserved up front
const FRAME_CAPACITY_HINT: usize = 4096;

/// Run `n_cycles` cycles with the built-in cost table
///
/// Returns `n_cycles + 1` frames (frame 0 is the initial state), or an empty
/// vector when no board is supplied.
pub fn simulate(
    n_cycles: Cycle,
    mechs: Vec<Mech>,
    atoms: Vec<Atom>,
    programs: &[Program],
    board: Option<&BoardConfig>,
) -> Vec<Frame> {
    simulate_with_costs(n_cycles, mechs, atoms, programs, board, &CostTable::default())
}

/// Run `n_cycles` cycles charging costs from `costs`
pub fn simulate_with_costs(
    n_cycles: Cycle,
    mechs: Vec<Mech>,
    atoms: Vec<Atom>,
    programs: &[Program],
    board: Option<&BoardConfig>,
    costs: &CostTable,
) -> Vec<Frame> {
    let Some(board) = board else {
        tracing::warn!("simulate called without a board; returning no frames");
        return Vec::new();
    };

    let base_cost = base_cost(&mechs, board, costs);
    tracing::debug!(
        n_cycles,
        mechs = mechs.len(),
        operators = board.operators.len(),
        base_cost,
        "starting simulation"
    );

    // Capacity is only a hint; the cycle count may exceed addressable memory
    let capacity = usize::try_from(n_cycles).map_or(FRAME_CAPACITY_HINT, |n| {
        n.saturating_add(1).min(FRAME_CAPACITY_HINT)
    });
    let mut frames = Vec::with_capacity(capacity);
    frames.push(Frame::initial(mechs, atoms, board.dimension, base_cost));

    for _ in 0..n_cycles {
        let next = match frames.last() {
            Some(last) => run_cycle(last, programs, board, costs),
            None => break,
        };
        frames.push(next);
    }

    frames
}

/// One-time placement cost: every mech plus every operator
///
/// Saturates at `Cost::MAX` like every other charge.
pub fn base_cost(mechs: &[Mech], board: &BoardConfig, costs: &CostTable) -> Cost {
    let mech_cost = mechs
        .iter()
        .map(|m| costs.mech_cost(m.kind))
        .fold(0, Cost::saturating_add);
    let operator_cost = board
        .operators
        .iter()
        .map(|o| costs.operator_cost(o.kind))
        .fold(0, Cost::saturating_add);
    mech_cost.saturating_add(operator_cost)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{GridCoord, MechId};
    use crate::entity::{AtomKind, Faucet, Operator, OperatorKind};

    #[test]
    fn test_missing_board_yields_no_frames() {
        let frames = simulate(10, vec![], vec![], &[], None);
        assert!(frames.is_empty());
    }

    #[test]
    fn test_zero_cycles_yields_initial_frame() {
        let board = BoardConfig::new(3);
        let frames = simulate(0, vec![], vec![], &[], Some(&board));
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].cycle, 0);
    }

    #[test]
    fn test_base_cost_counts_mechs_and_operators() {
        let costs = CostTable::default();
        let board = BoardConfig::new(4).with_operator(Operator::new(
            OperatorKind::Shake,
            vec![GridCoord::new(0, 0), GridCoord::new(1, 0)],
            vec![GridCoord::new(2, 0)],
        ));
        let mechs = vec![
            Mech::new(MechId(0), GridCoord::new(0, 1)),
            Mech::new(MechId(1), GridCoord::new(1, 1)),
        ];
        let expected = 2 * costs.static_costs.singleton + costs.static_costs.shake;
        assert_eq!(base_cost(&mechs, &board, &costs), expected);

        let frames = simulate(3, mechs, vec![], &[], Some(&board));
        assert_eq!(frames[0].cost, expected);
    }

    #[test]
    fn test_base_cost_saturates() {
        let mut costs = CostTable::default();
        costs.static_costs.singleton = Cost::MAX / 2 + 1;
        costs.static_costs.shake = Cost::MAX;
        let board = BoardConfig::new(4);
        let mechs = vec![
            Mech::new(MechId(0), GridCoord::new(0, 0)),
            Mech::new(MechId(1), GridCoord::new(1, 0)),
        ];
        assert_eq!(base_cost(&mechs, &board, &costs), Cost::MAX);

        let frames = simulate_with_costs(1, mechs, vec![], &[], Some(&board), &costs);
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].cost, Cost::MAX);
        assert_eq!(frames[1].cost, Cost::MAX);

        // Operator costs saturate on their own as well
        let busy = BoardConfig::new(4)
            .with_operator(Operator::new(
                OperatorKind::Shake,
                vec![GridCoord::new(0, 0), GridCoord::new(1, 0)],
                vec![GridCoord::new(2, 0)],
            ))
            .with_operator(Operator::new(
                OperatorKind::Shake,
                vec![GridCoord::new(0, 1), GridCoord::new(1, 1)],
                vec![GridCoord::new(2, 1)],
            ));
        assert_eq!(base_cost(&[], &busy, &costs), Cost::MAX);
    }

    #[test]
    fn test_huge_board_simulates() {
        let board = BoardConfig::new(u32::MAX).with_faucet(Faucet::new(
            "origin",
            GridCoord::new(0, 0),
            AtomKind::Vanilla,
        ));
        let frames = simulate(2, vec![], vec![], &[], Some(&board));
        assert_eq!(frames.len(), 3);
        assert!(frames[2].occupancy.is_populated(GridCoord::new(0, 0)));
        assert_eq!(frames[2].atoms.len(), 1);
    }

    #[test]
    fn test_frames_are_numbered() {
        let board = BoardConfig::new(2);
        let frames = simulate(5, vec![], vec![], &[], Some(&board));
        let cycles: Vec<_> = frames.iter().map(|f| f.cycle).collect();
        assert_eq!(cycles, vec![0, 1, 2, 3, 4, 5]);
    }
}
