use std::{fmt, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::{
    error::program::*,
    instruction::{Instruction, OperandKind},
};

/// A validated, immutable instruction stream.
///
/// Entries alternate opcode and operand, so instruction `k` lives at
/// `(2k, 2k + 1)`. Every entry is a 3-bit value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct Program {
    digits: Arc<[u8]>,
}

impl Program {
    pub fn new(digits: Vec<u8>) -> ProgramResult<Self> {
        if digits.is_empty() {
            return Err(ProgramError::Empty);
        }
        if digits.len() % 2 != 0 {
            return Err(ProgramError::OddLength(digits.len()));
        }
        if let Some((index, &value)) = digits.iter().enumerate().find(|(_, v)| **v > 7) {
            return Err(ProgramError::ValueOutOfRange { index, value: value as u64 });
        }
        for pair in (0..digits.len()).step_by(2) {
            // Opcodes are all valid once every digit is below 8.
            let combo = Instruction::decode(digits[pair])
                .map(|i| i.operand_kind() == OperandKind::Combo)
                .unwrap_or(false);
            if combo && digits[pair + 1] == 7 {
                return Err(ProgramError::ReservedComboOperand { index: pair + 1 });
            }
        }
        Ok(Self {
            digits: digits.into(),
        })
    }

    pub fn len(&self) -> usize {
        self.digits.len()
    }

    /// Always false for a constructed program; kept for the usual `len` pairing.
    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.digits
    }

    /// Iterate `(address, instruction, operand)` triples in program order.
    pub fn instructions(&self) -> impl Iterator<Item = (usize, Instruction, u8)> + '_ {
        self.digits
            .chunks_exact(2)
            .enumerate()
            .filter_map(|(k, pair)| Instruction::decode(pair[0]).map(|i| (k * 2, i, pair[1])))
    }

    pub fn disassemble(&self) -> Vec<String> {
        self.instructions()
            .map(|(addr, instruction, operand)| {
                let rendered = match instruction.operand_kind() {
                    OperandKind::Literal => operand.to_string(),
                    OperandKind::Ignored => "_".to_string(),
                    OperandKind::Combo => match operand {
                        4 => "a".to_string(),
                        5 => "b".to_string(),
                        6 => "c".to_string(),
                        n => n.to_string(),
                    },
                };
                format!("{:>3}: {} {}", addr, instruction, rendered)
            })
            .collect()
    }
}

impl TryFrom<Vec<u8>> for Program {
    type Error = ProgramError;

    fn try_from(digits: Vec<u8>) -> ProgramResult<Self> {
        Self::new(digits)
    }
}

impl From<Program> for Vec<u8> {
    fn from(p: Program) -> Vec<u8> {
        p.digits.to_vec()
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::format_output(&self.digits))
    }
}
