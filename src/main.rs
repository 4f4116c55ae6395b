//! Mechworks - headless scenario runner
//!
//! Loads a scenario file, runs the simulation and prints either a run
//! summary or the full frame sequence as JSON for external renderers.

use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use mechworks::core::config::{Constraints, CostTable};
use mechworks::core::error::Result;
use mechworks::simulation::{simulate_with_costs, Frame, RunSummary};
use mechworks::world::{check_board, ScenarioLoader};

/// Run a mech puzzle scenario to completion
#[derive(Parser, Debug)]
#[command(name = "mechworks")]
#[command(about = "Simulate a mech/operator board and report what was delivered")]
struct Args {
    /// Scenario TOML file
    scenario: PathBuf,

    /// Cycles to run (defaults to the scenario's own count)
    #[arg(long)]
    cycles: Option<u64>,

    /// Cost table TOML overriding the built-in costs
    #[arg(long)]
    costs: Option<PathBuf>,

    /// Output format: text or json
    #[arg(long, default_value = "text")]
    format: String,

    /// Reject boards that break placement rules before simulating
    #[arg(long)]
    check: bool,

    /// Print each cycle's notes in text mode
    #[arg(long)]
    notes: bool,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// JSON output structure
#[derive(Serialize)]
struct RunReport<'a> {
    scenario: &'a str,
    summary: Option<RunSummary>,
    frames: &'a [Frame],
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose {
        "mechworks=debug"
    } else {
        "mechworks=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let scenario = ScenarioLoader::load_from_file(&args.scenario)?;

    let costs = match &args.costs {
        Some(path) => CostTable::load_from_toml(path)?,
        None => CostTable::default(),
    };

    let mechs = scenario.initial_mechs();
    if args.check {
        check_board(
            scenario.board(),
            &mechs,
            scenario.programs(),
            &Constraints::default(),
        )?;
        tracing::info!("placement check passed");
    }

    let cycles = args.cycles.unwrap_or(scenario.cycles);
    let frames = simulate_with_costs(
        cycles,
        mechs,
        scenario.initial_atoms(),
        scenario.programs(),
        Some(scenario.board()),
        &costs,
    );
    let summary = RunSummary::from_frames(&frames);

    match args.format.as_str() {
        "json" => {
            let report = RunReport {
                scenario: &scenario.name,
                summary,
                frames: &frames,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => {
            println!("=== {} ===", scenario.name);
            if args.notes {
                for frame in frames.iter().skip(1) {
                    println!("[{:>4}] {}", frame.cycle, frame.notes);
                }
                println!();
            }
            if let Some(summary) = summary {
                println!("{}", summary);
            }
        }
    }

    Ok(())
}
