use std::fmt;
use super::TribitError;

#[derive(Debug, Clone, PartialEq)]
pub enum ProgramError {
	Empty,
	OddLength(usize),
	ValueOutOfRange { index: usize, value: u64 },
	ReservedComboOperand { index: usize },
}

impl fmt::Display for ProgramError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Empty => write!(f, "program is empty"),
			Self::OddLength(len) => write!(f, "program has odd length {}", len),
			Self::ValueOutOfRange { index, value } => {
				write!(f, "value {} at index {} is not a 3-bit number", value, index)
			}
			Self::ReservedComboOperand { index } => {
				write!(f, "combo operand 7 at index {} is reserved", index)
			}
		}
	}
}

impl std::error::Error for ProgramError {}
impl TribitError for ProgramError {}

pub type ProgramResult<O = ()> = Result<O, ProgramError>;
