//! Mech instructions and instruction tapes

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::spatial::grid::Direction;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProgramError {
    #[error("unknown instruction '{symbol}' at position {index}")]
    UnknownInstruction { index: usize, symbol: String },

    #[error("empty instruction at position {index}")]
    EmptyInstruction { index: usize },
}

/// One step of a mech program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Instruction {
    /// `d` / `a` / `s` / `w`
    Move(Direction),
    /// `z`
    Get,
    /// `x`
    Put,
    /// `g`: wait on this instruction until there is an atom to pick up
    BlockingGet,
    /// `h`: wait on this instruction until the cell is clear to drop
    BlockingPut,
    /// `.` or `_`
    Noop,
}

impl Instruction {
    /// Decode a symbol, case-insensitively
    pub fn from_symbol(symbol: char) -> Option<Self> {
        let instruction = match symbol.to_ascii_lowercase() {
            'd' => Instruction::Move(Direction::PosX),
            'a' => Instruction::Move(Direction::NegX),
            's' => Instruction::Move(Direction::PosY),
            'w' => Instruction::Move(Direction::NegY),
            'z' => Instruction::Get,
            'x' => Instruction::Put,
            'g' => Instruction::BlockingGet,
            'h' => Instruction::BlockingPut,
            '.' | '_' => Instruction::Noop,
            _ => return None,
        };
        Some(instruction)
    }

    /// Canonical lowercase symbol
    pub fn symbol(&self) -> char {
        match self {
            Instruction::Move(Direction::PosX) => 'd',
            Instruction::Move(Direction::NegX) => 'a',
            Instruction::Move(Direction::PosY) => 's',
            Instruction::Move(Direction::NegY) => 'w',
            Instruction::Get => 'z',
            Instruction::Put => 'x',
            Instruction::BlockingGet => 'g',
            Instruction::BlockingPut => 'h',
            Instruction::Noop => '.',
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A cyclic instruction tape for one mech
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    instructions: Vec<Instruction>,
}

impl Program {
    pub fn new(instructions: Vec<Instruction>) -> Self {
        Self { instructions }
    }

    /// Parse comma-separated symbols such as `"d,s,Z,_"`
    ///
    /// Whitespace around items is ignored. Blank text is the empty program;
    /// otherwise every comma-separated item must hold one symbol, so the
    /// program length always equals the item count.
    pub fn parse(text: &str) -> Result<Self, ProgramError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let mut instructions = Vec::new();
        for (index, item) in text.split(',').map(str::trim).enumerate() {
            if item.is_empty() {
                return Err(ProgramError::EmptyInstruction { index });
            }
            let mut chars = item.chars();
            let decoded = match (chars.next(), chars.next()) {
                (Some(c), None) => Instruction::from_symbol(c),
                _ => None,
            };
            match decoded {
                Some(instruction) => instructions.push(instruction),
                None => {
                    return Err(ProgramError::UnknownInstruction {
                        index,
                        symbol: item.to_string(),
                    })
                }
            }
        }
        Ok(Self { instructions })
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Instruction selected by a program counter; an empty tape idles
    pub fn instruction_at(&self, pc: u64) -> Instruction {
        if self.instructions.is_empty() {
            return Instruction::Noop;
        }
        let idx = (pc % self.instructions.len() as u64) as usize;
        self.instructions[idx]
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, instruction) in self.instructions.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", instruction)?;
        }
        Ok(())
    }
}

impl FromIterator<Instruction> for Program {
    fn from_iter<I: IntoIterator<Item = Instruction>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
