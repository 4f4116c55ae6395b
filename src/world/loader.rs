//! Load scenarios from TOML files
//!
//! `ScenarioLoader` resolves a `ScenarioFile` into a `Scenario`: kind names
//! become enums, program text becomes `Program`s, and held atoms close the
//! gripper of the mech holding them.

use std::path::Path;
use thiserror::Error;

use crate::core::types::{AtomId, GridCoord, MechId};
use crate::entity::{
    Atom, AtomKind, AtomStatus, Faucet, Mech, MechStatus, Operator, OperatorKind, Sink,
};
use crate::simulation::instruction::{Program, ProgramError};
use crate::world::board::BoardConfig;
use crate::world::scenario::{AtomEntry, Scenario, ScenarioFile, DEFAULT_CYCLES};

/// Errors that can occur when loading a scenario
#[derive(Debug, Error)]
pub enum LoadError {
    /// File I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),
    #[error("operator {index}: unknown kind '{kind}'")]
    UnknownOperatorKind { index: usize, kind: String },
    #[error("{entry}: unknown atom kind '{kind}'")]
    UnknownAtomKind { entry: String, kind: String },
    #[error("mech {index}: {source}")]
    Program {
        index: usize,
        #[source]
        source: ProgramError,
    },
    /// An atom names a mech index that does not exist
    #[error("atom {index} is held by mech {mech}, which does not exist")]
    UnknownHolder { index: usize, mech: usize },
    /// Two atoms claim the same gripper
    #[error("mech {mech} holds more than one atom")]
    DoubleHeld { mech: usize },
}

/// Converts scenario files into simulation inputs
pub struct ScenarioLoader;

impl ScenarioLoader {
    /// Load a scenario from a TOML string
    pub fn load_from_str(content: &str) -> Result<Scenario, LoadError> {
        let file: ScenarioFile = toml::from_str(content)?;
        Self::resolve(file)
    }

    /// Load a scenario from a TOML file on disk
    pub fn load_from_file(path: &Path) -> Result<Scenario, LoadError> {
        let content = std::fs::read_to_string(path)?;
        let mut scenario = Self::load_from_str(&content)?;
        if scenario.name.is_empty() {
            if let Some(stem) = path.file_stem() {
                scenario.name = stem.to_string_lossy().into_owned();
            }
        }
        tracing::info!(
            path = %path.display(),
            name = %scenario.name,
            mechs = scenario.mechs.len(),
            operators = scenario.board.operators.len(),
            "scenario loaded"
        );
        Ok(scenario)
    }

    fn resolve(file: ScenarioFile) -> Result<Scenario, LoadError> {
        let mut board = BoardConfig::new(file.dimension);

        for (i, entry) in file.faucets.iter().enumerate() {
            let id = entry.id.clone().unwrap_or_else(|| format!("faucet{}", i));
            let kind = parse_atom_kind(&entry.kind, || id.clone())?;
            board.faucets.push(Faucet::new(id, coord(entry.position), kind));
        }

        for (i, entry) in file.sinks.iter().enumerate() {
            let id = entry.id.clone().unwrap_or_else(|| format!("sink{}", i));
            board.sinks.push(Sink::new(id, coord(entry.position)));
        }

        for (index, entry) in file.operators.iter().enumerate() {
            let kind: OperatorKind =
                entry
                    .kind
                    .parse()
                    .map_err(|_| LoadError::UnknownOperatorKind {
                        index,
                        kind: entry.kind.clone(),
                    })?;
            let input = entry.input.iter().copied().map(coord).collect();
            let output = entry.output.iter().copied().map(coord).collect();
            board.operators.push(Operator::new(kind, input, output));
        }

        let mut mechs = Vec::with_capacity(file.mechs.len());
        let mut programs = Vec::with_capacity(file.mechs.len());
        for (index, entry) in file.mechs.iter().enumerate() {
            let program = Program::parse(&entry.program)
                .map_err(|source| LoadError::Program { index, source })?;
            let mech = Mech::new(MechId(index as u32), coord(entry.position))
                .with_status(entry.status.unwrap_or(MechStatus::Open));
            mechs.push(mech);
            programs.push(program);
        }

        let atoms = resolve_atoms(&file.atoms, &mut mechs)?;

        Ok(Scenario {
            name: file.name.unwrap_or_default(),
            cycles: file.cycles.unwrap_or(DEFAULT_CYCLES),
            board,
            mechs,
            atoms,
            programs,
        })
    }
}

fn resolve_atoms(entries: &[AtomEntry], mechs: &mut [Mech]) -> Result<Vec<Atom>, LoadError> {
    let mut atoms = Vec::with_capacity(entries.len());
    let mut holders = vec![false; mechs.len()];

    for (index, entry) in entries.iter().enumerate() {
        let kind = parse_atom_kind(&entry.kind, || format!("atom {}", index))?;
        let mut atom = Atom::free(AtomId(index as u32), kind, coord(entry.position));

        if let Some(holder) = entry.held_by {
            let mech = mechs.get_mut(holder).ok_or(LoadError::UnknownHolder {
                index,
                mech: holder,
            })?;
            if holders[holder] {
                return Err(LoadError::DoubleHeld { mech: holder });
            }
            holders[holder] = true;
            mech.status = MechStatus::Close;
            atom.position = mech.position;
            atom.status = AtomStatus::Possessed;
            atom.possessed_by = Some(mech.id);
        }

        atoms.push(atom);
    }

    Ok(atoms)
}

fn parse_atom_kind(kind: &str, entry: impl FnOnce() -> String) -> Result<AtomKind, LoadError> {
    kind.parse().map_err(|_| LoadError::UnknownAtomKind {
        entry: entry(),
        kind: kind.to_string(),
    })
}

fn coord([x, y]: [i32; 2]) -> GridCoord {
    GridCoord::new(x, y)
}
