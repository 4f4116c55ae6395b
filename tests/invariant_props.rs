//! Property tests for whole-run invariants
//!
//! Random mech programs run on a fixed production board: two vanilla
//! faucets feeding a Shake operator, a Wilt operator chained on Shake's
//! output, plus a sink. Whatever the mechs do, every frame sequence must
//! satisfy the invariants below.

use mechworks::core::types::{AtomId, GridCoord, MechId};
use mechworks::entity::{AtomKind, AtomStatus, Faucet, Mech, Operator, OperatorKind, Sink};
use mechworks::simulation::{simulate, Frame, Instruction, Program};
use mechworks::world::BoardConfig;
use proptest::prelude::*;

const SYMBOLS: &[char] = &['d', 'a', 's', 'w', 'z', 'x', 'g', 'h', '.'];

fn production_board(dimension: u32) -> BoardConfig {
    BoardConfig::new(dimension)
        .with_faucet(Faucet::new("left", GridCoord::new(1, 1), AtomKind::Vanilla))
        .with_faucet(Faucet::new("right", GridCoord::new(2, 1), AtomKind::Vanilla))
        .with_operator(Operator::new(
            OperatorKind::Shake,
            vec![GridCoord::new(1, 1), GridCoord::new(2, 1)],
            vec![GridCoord::new(3, 1)],
        ))
        .with_operator(Operator::new(
            OperatorKind::Wilt,
            vec![GridCoord::new(3, 1)],
            vec![GridCoord::new(3, 2)],
        ))
        .with_sink(Sink::new("sink", GridCoord::new(0, 3)))
}

fn arb_program() -> impl Strategy<Value = Program> {
    prop::collection::vec(prop::sample::select(SYMBOLS), 1..8).prop_map(|symbols| {
        symbols
            .into_iter()
            .filter_map(Instruction::from_symbol)
            .collect()
    })
}

/// Dimension, mech start cells and one program per mech
fn arb_setup() -> impl Strategy<Value = (u32, Vec<Mech>, Vec<Program>)> {
    (4u32..7).prop_flat_map(|dim| {
        let max = dim as i32;
        prop::collection::vec(((0..max, 0..max), arb_program()), 1..4).prop_map(move |entries| {
            let (mechs, programs): (Vec<Mech>, Vec<Program>) = entries
                .into_iter()
                .enumerate()
                .map(|(i, ((x, y), program))| {
                    (Mech::new(MechId(i as u32), GridCoord::new(x, y)), program)
                })
                .unzip();
            (dim, mechs, programs)
        })
    })
}

fn sorted(mut kinds: Vec<AtomKind>) -> Vec<AtomKind> {
    kinds.sort();
    kinds
}

fn sorted_kinds(frame: &Frame, ids: &[AtomId]) -> Vec<AtomKind> {
    sorted(ids.iter().filter_map(|id| frame.atom(*id)).map(|a| a.kind).collect())
}

fn run(cycles: u64, dim: u32, mechs: &[Mech], programs: &[Program]) -> Vec<Frame> {
    let board = production_board(dim);
    simulate(cycles, mechs.to_vec(), vec![], programs, Some(&board))
}

proptest! {
    #[test]
    fn prop_frame_count((dim, mechs, programs) in arb_setup(), cycles in 0u64..40) {
        let frames = run(cycles, dim, &mechs, &programs);
        prop_assert_eq!(frames.len() as u64, cycles + 1);
        for (i, frame) in frames.iter().enumerate() {
            prop_assert_eq!(frame.cycle, i as u64);
        }
    }

    #[test]
    fn prop_deterministic((dim, mechs, programs) in arb_setup(), cycles in 0u64..40) {
        let first = run(cycles, dim, &mechs, &programs);
        let second = run(cycles, dim, &mechs, &programs);
        prop_assert_eq!(&first, &second);

        let first_json = serde_json::to_string(&first).unwrap();
        let second_json = serde_json::to_string(&second).unwrap();
        prop_assert_eq!(first_json, second_json);
    }

    #[test]
    fn prop_atoms_append_only((dim, mechs, programs) in arb_setup(), cycles in 1u64..40) {
        let frames = run(cycles, dim, &mechs, &programs);
        for pair in frames.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            prop_assert!(next.atoms.len() >= prev.atoms.len());
            for (i, atom) in next.atoms.iter().enumerate() {
                prop_assert_eq!(atom.id, AtomId(i as u32));
            }
            for (before, after) in prev.atoms.iter().zip(&next.atoms) {
                prop_assert_eq!(before.kind, after.kind);
                // Terminal atoms never change again
                if before.status.is_terminal() {
                    prop_assert_eq!(before, after);
                }
            }
        }
    }

    #[test]
    fn prop_occupancy_matches_free_atoms(
        (dim, mechs, programs) in arb_setup(),
        cycles in 0u64..40
    ) {
        let frames = run(cycles, dim, &mechs, &programs);
        for frame in &frames {
            for y in 0..dim as i32 {
                for x in 0..dim as i32 {
                    let cell = GridCoord::new(x, y);
                    let free_here = frame.atoms.iter().filter(|a| a.is_free_at(cell)).count();
                    prop_assert!(
                        free_here <= 1,
                        "cycle {} cell {}: {} free atoms",
                        frame.cycle,
                        cell,
                        free_here
                    );
                    prop_assert_eq!(frame.occupancy.is_populated(cell), free_here == 1);
                }
            }
        }
    }

    #[test]
    fn prop_holding_matches_gripper((dim, mechs, programs) in arb_setup(), cycles in 0u64..40) {
        let frames = run(cycles, dim, &mechs, &programs);
        for frame in &frames {
            for mech in &frame.mechs {
                let held: Vec<_> = frame.atoms.iter().filter(|a| a.is_held_by(mech.id)).collect();
                prop_assert_eq!(held.len(), usize::from(!mech.is_open()));
                for atom in held {
                    prop_assert_eq!(atom.status, AtomStatus::Possessed);
                    prop_assert_eq!(atom.position, mech.position);
                }
            }
        }
    }

    #[test]
    fn prop_reactions_conserve((dim, mechs, programs) in arb_setup(), cycles in 1u64..40) {
        let frames = run(cycles, dim, &mechs, &programs);
        for pair in frames.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);

            // Every firing accounts for exactly its recipe
            let mut recipe_inputs = Vec::new();
            let mut recipe_outputs = Vec::new();
            for kind in OperatorKind::ALL {
                let fired = next.notes.matches(&format!("{} fired", kind)).count();
                let recipe = kind.recipe();
                for _ in 0..fired {
                    recipe_inputs.extend_from_slice(recipe.inputs);
                    recipe_outputs.extend_from_slice(recipe.outputs);
                }
            }
            prop_assert_eq!(sorted_kinds(next, &next.consumed_atom_ids), sorted(recipe_inputs));
            prop_assert_eq!(sorted_kinds(next, &next.produced_atom_ids), sorted(recipe_outputs));

            // Faucet atoms can be spawned and consumed within the same cycle
            let newly_consumed: Vec<AtomId> = next
                .atoms
                .iter()
                .enumerate()
                .filter(|(i, after)| {
                    after.status == AtomStatus::Consumed
                        && prev.atoms.get(*i).map_or(true, |b| b.status != AtomStatus::Consumed)
                })
                .map(|(_, after)| after.id)
                .collect();
            let mut consumed = next.consumed_atom_ids.clone();
            consumed.sort();
            prop_assert_eq!(newly_consumed, consumed);

            // Products are always fresh atoms
            for id in &next.produced_atom_ids {
                prop_assert!(id.0 as usize >= prev.atoms.len());
            }
        }
    }

    #[test]
    fn prop_delivered_ledger_grows((dim, mechs, programs) in arb_setup(), cycles in 1u64..40) {
        let frames = run(cycles, dim, &mechs, &programs);
        for pair in frames.windows(2) {
            prop_assert!(pair[1].delivered.starts_with(&pair[0].delivered));
            prop_assert!(pair[1].cost >= pair[0].cost);
        }
        let last = frames.last().unwrap();
        prop_assert_eq!(last.delivered.len(), last.count_with_status(AtomStatus::Delivered));
    }
}
