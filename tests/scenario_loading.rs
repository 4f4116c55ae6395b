//! Integration tests for scenario files and cost tables on disk
//!
//! These tests load the bundled scenarios under `data/scenarios/`, check
//! them against the placement rules and run them end to end.

use std::path::PathBuf;

use mechworks::core::config::{Constraints, CostTable};
use mechworks::entity::AtomKind;
use mechworks::simulation::{simulate, simulate_with_costs, RunSummary};
use mechworks::world::{check_board, PlacementError, ScenarioLoader};

fn scenario_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("data/scenarios")
        .join(name)
}

/// The bundled scenario is legal and delivers chocolate
#[test]
fn test_shake_and_deliver_runs() {
    let scenario =
        ScenarioLoader::load_from_file(&scenario_path("shake_and_deliver.toml")).unwrap();
    assert_eq!(scenario.name, "shake_and_deliver");
    assert_eq!(scenario.mech_count(), 3);

    let mechs = scenario.initial_mechs();
    check_board(
        scenario.board(),
        &mechs,
        scenario.programs(),
        &Constraints::default(),
    )
    .unwrap();

    let frames = simulate(
        scenario.cycles,
        mechs,
        scenario.initial_atoms(),
        scenario.programs(),
        Some(scenario.board()),
    );
    assert_eq!(frames.len() as u64, scenario.cycles + 1);

    // First chocolate reaches the sink on cycle 11
    assert!(frames[10].delivered.is_empty());
    assert_eq!(frames[11].delivered, vec![AtomKind::Chocolate]);

    let summary = RunSummary::from_frames(&frames).unwrap();
    assert!(summary.delivered(AtomKind::Chocolate) >= 3);
    assert_eq!(summary.delivered(AtomKind::Vanilla), 0);
}

/// A custom cost table changes the bill but not the behaviour
#[test]
fn test_cost_table_override() {
    let scenario =
        ScenarioLoader::load_from_file(&scenario_path("shake_and_deliver.toml")).unwrap();
    let pricey = CostTable::parse_toml(
        r#"
        [static]
        singleton = 1000

        [dynamic]
        move_empty = 5
        move_carry = 10
        "#,
    )
    .unwrap();

    let run = |costs: &CostTable| {
        simulate_with_costs(
            20,
            scenario.initial_mechs(),
            scenario.initial_atoms(),
            scenario.programs(),
            Some(scenario.board()),
            costs,
        )
    };
    let cheap_frames = run(&CostTable::default());
    let pricey_frames = run(&pricey);

    assert_eq!(pricey_frames[0].cost - cheap_frames[0].cost, 3 * (1000 - 150));
    assert!(pricey_frames[20].cost > cheap_frames[20].cost);
    for (a, b) in cheap_frames.iter().zip(&pricey_frames) {
        assert_eq!(a.atoms, b.atoms);
        assert_eq!(a.mechs, b.mechs);
        assert_eq!(a.delivered, b.delivered);
    }
}

/// Overlapping cells load fine but fail the placement check
#[test]
fn test_overlap_is_caught_by_check() {
    let toml = r#"
        dimension = 4

        [[faucets]]
        position = [0, 0]
        kind = "vanilla"

        [[operators]]
        kind = "stir"
        input = [[0, 0], [1, 0]]
        output = [[2, 0]]
    "#;
    let scenario = ScenarioLoader::load_from_str(toml).unwrap();
    let result = check_board(
        scenario.board(),
        &scenario.initial_mechs(),
        scenario.programs(),
        &Constraints::default(),
    );
    assert!(matches!(result, Err(PlacementError::OverlappingCell(_))));
}

/// Loading a missing file reports an IO error
#[test]
fn test_missing_file() {
    let result = ScenarioLoader::load_from_file(&scenario_path("does_not_exist.toml"));
    assert!(matches!(
        result,
        Err(mechworks::world::LoadError::IoError(_))
    ));
}
