use std::{collections::HashMap, fmt};

use lazy_static::lazy_static;
use maplit::hashmap;
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

/*
    A, B, C: registers
    L      : literal operand
    K      : combo operand (0-3 literal, 4 = A, 5 = B, 6 = C, 7 reserved)
    IP     : instruction pointer
*/
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, FromPrimitive)]
pub enum Instruction {
    Adv, // 0  ADV [K]  A = A >> K
    Bxl, // 1  BXL [L]  B = B ^ L
    Bst, // 2  BST [K]  B = K % 8
    Jnz, // 3  JNZ [L]  if A != 0 then IP = L
    Bxc, // 4  BXC [_]  B = B ^ C
    Out, // 5  OUT [K]  emit K % 8
    Bdv, // 6  BDV [K]  B = A >> K
    Cdv, // 7  CDV [K]  C = A >> K
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperandKind {
    Literal,
    Combo,
    Ignored,
}

lazy_static! {
    static ref MNEMONICS: HashMap<Instruction, &'static str> = hashmap! {
        Instruction::Adv => "adv",
        Instruction::Bxl => "bxl",
        Instruction::Bst => "bst",
        Instruction::Jnz => "jnz",
        Instruction::Bxc => "bxc",
        Instruction::Out => "out",
        Instruction::Bdv => "bdv",
        Instruction::Cdv => "cdv",
    };
}

impl Instruction {
    /// Decode a raw opcode, `None` if it is not one of the eight.
    pub fn decode(opcode: u8) -> Option<Self> {
        Self::from_u8(opcode)
    }

    pub fn operand_kind(self) -> OperandKind {
        match self {
            Self::Bxl | Self::Jnz => OperandKind::Literal,
            Self::Bxc => OperandKind::Ignored,
            Self::Adv | Self::Bst | Self::Out | Self::Bdv | Self::Cdv => OperandKind::Combo,
        }
    }

    pub fn mnemonic(self) -> &'static str {
        MNEMONICS.get(&self).copied().unwrap_or("???")
    }

    pub fn from_mnemonic(name: &str) -> Option<Self> {
        MNEMONICS
            .iter()
            .find(|(_, m)| m.eq_ignore_ascii_case(name))
            .map(|(i, _)| *i)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_all_opcodes() {
        for op in 0..8u8 {
            let i = Instruction::decode(op).unwrap();
            assert_eq!(i as u8, op);
        }
        assert_eq!(Instruction::decode(8), None);
    }

    #[test]
    fn mnemonics_round_trip() {
        for op in 0..8u8 {
            let i = Instruction::decode(op).unwrap();
            assert_eq!(Instruction::from_mnemonic(i.mnemonic()), Some(i));
        }
        assert_eq!(Instruction::from_mnemonic("JNZ"), Some(Instruction::Jnz));
        assert_eq!(Instruction::from_mnemonic("nop"), None);
    }

    #[test]
    fn operand_kinds() {
        assert_eq!(Instruction::Bxl.operand_kind(), OperandKind::Literal);
        assert_eq!(Instruction::Jnz.operand_kind(), OperandKind::Literal);
        assert_eq!(Instruction::Bxc.operand_kind(), OperandKind::Ignored);
        assert_eq!(Instruction::Out.operand_kind(), OperandKind::Combo);
    }
}
