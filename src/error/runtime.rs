use std::fmt;
use super::TribitError;

#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeError {
	Bytecode(BytecodeError),
	StepLimitExceeded { limit: u64, ip: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub enum BytecodeError {
	UnknownOpcode(u8),
	ReservedComboOperand(u8),
}

impl fmt::Display for RuntimeError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Bytecode(BytecodeError::UnknownOpcode(op)) => write!(f, "unknown opcode {}", op),
			Self::Bytecode(BytecodeError::ReservedComboOperand(operand)) => {
				write!(f, "combo operand {} is reserved", operand)
			}
			Self::StepLimitExceeded { limit, ip } => {
				write!(f, "step limit of {} exceeded at instruction pointer {}", limit, ip)
			}
		}
	}
}

impl std::error::Error for RuntimeError {}
impl TribitError for RuntimeError {}

macro_rules! malformed_bytecode {
	($kind:ident($v:expr)) => {
		Err(RuntimeError::Bytecode(BytecodeError::$kind($v)))
	};
}

pub(crate) use malformed_bytecode;

pub type RuntimeResult<T = ()> = Result<T, RuntimeError>;
