//! Operators - fixed-recipe reaction sites
//!
//! An operator occupies an ordered path of cells: its input cells followed by
//! its output cells. When every input cell holds a free atom of the right
//! flavour and every output cell is empty, the inputs are consumed and the
//! outputs are produced in one step.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::types::GridCoord;
use crate::entity::atom::AtomKind;
use AtomKind::*;

/// Input and output flavours of an operator kind, both positional
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recipe {
    pub inputs: &'static [AtomKind],
    pub outputs: &'static [AtomKind],
}

/// The eight operator kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatorKind {
    Stir,
    Shake,
    Steam,
    Smash,
    Evolve,
    Slow,
    Wilt,
    Bake,
}

impl OperatorKind {
    pub const ALL: [OperatorKind; 8] = [
        OperatorKind::Stir,
        OperatorKind::Shake,
        OperatorKind::Steam,
        OperatorKind::Smash,
        OperatorKind::Evolve,
        OperatorKind::Slow,
        OperatorKind::Wilt,
        OperatorKind::Bake,
    ];

    pub fn recipe(&self) -> Recipe {
        match self {
            OperatorKind::Stir => Recipe {
                inputs: &[Vanilla, Vanilla],
                outputs: &[Hazelnut],
            },
            OperatorKind::Shake => Recipe {
                inputs: &[Vanilla, Vanilla],
                outputs: &[Chocolate],
            },
            OperatorKind::Steam => Recipe {
                inputs: &[Hazelnut, Chocolate, Chocolate],
                outputs: &[Truffle, Vanilla, Vanilla],
            },
            OperatorKind::Smash => Recipe {
                inputs: &[Truffle],
                outputs: &[Saffron, Vanilla, Vanilla],
            },
            OperatorKind::Evolve => Recipe {
                inputs: &[Vanilla, Vanilla, Vanilla, Vanilla],
                outputs: &[Turtle],
            },
            OperatorKind::Slow => Recipe {
                inputs: &[Turtle],
                outputs: &[Sandglass],
            },
            OperatorKind::Wilt => Recipe {
                inputs: &[Chocolate],
                outputs: &[Wilted],
            },
            OperatorKind::Bake => Recipe {
                inputs: &[Hazelnut, Hazelnut],
                outputs: &[Chocolate, Chocolate],
            },
        }
    }

    /// Single-character board glyph
    pub fn symbol(&self) -> char {
        match self {
            OperatorKind::Stir => '&',
            OperatorKind::Shake => '%',
            OperatorKind::Steam => '^',
            OperatorKind::Smash => '#',
            OperatorKind::Evolve => '§',
            OperatorKind::Slow => '|',
            OperatorKind::Wilt => '~',
            OperatorKind::Bake => '!',
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            OperatorKind::Stir => "stir",
            OperatorKind::Shake => "shake",
            OperatorKind::Steam => "steam",
            OperatorKind::Smash => "smash",
            OperatorKind::Evolve => "evolve",
            OperatorKind::Slow => "slow",
            OperatorKind::Wilt => "wilt",
            OperatorKind::Bake => "bake",
        }
    }
}

impl fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts either the kind's name (any case) or its glyph
impl FromStr for OperatorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let lower = trimmed.to_lowercase();
        OperatorKind::ALL
            .into_iter()
            .find(|k| k.name() == lower || trimmed.chars().eq(std::iter::once(k.symbol())))
            .ok_or_else(|| format!("unknown operator kind '{}'", s))
    }
}

/// A placed operator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operator {
    pub kind: OperatorKind,
    /// Input cells, positionally matched against the recipe inputs
    pub input: Vec<GridCoord>,
    /// Output cells, positionally matched against the recipe outputs
    pub output: Vec<GridCoord>,
}

impl Operator {
    pub fn new(kind: OperatorKind, input: Vec<GridCoord>, output: Vec<GridCoord>) -> Self {
        Self {
            kind,
            input,
            output,
        }
    }

    /// All cells in placement order: inputs then outputs
    pub fn cells(&self) -> impl Iterator<Item = &GridCoord> + '_ {
        self.input.iter().chain(self.output.iter())
    }

    /// Cell counts agree with the recipe
    pub fn matches_arity(&self) -> bool {
        let recipe = self.kind.recipe();
        self.input.len() == recipe.inputs.len() && self.output.len() == recipe.outputs.len()
    }

    /// No cell appears twice across inputs and outputs
    pub fn has_distinct_cells(&self) -> bool {
        let cells: Vec<&GridCoord> = self.cells().collect();
        cells
            .iter()
            .enumerate()
            .all(|(i, c)| !cells[i + 1..].contains(c))
    }

    /// Arity matches, cells are distinct and every cell is on the board
    ///
    /// Operators failing this can never fire.
    pub fn is_well_formed(&self, dimension: u32) -> bool {
        self.matches_arity()
            && self.has_distinct_cells()
            && self.cells().all(|c| c.in_bounds(dimension))
    }
}
