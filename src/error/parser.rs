use std::fmt;
use super::{program::ProgramError, TribitError};
use crate::TokenKind;

#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
	TokenError(TokenError),
	RegisterError(RegisterError),
	InvalidProgram(ProgramError),
	MissingProgram,
	DuplicateProgram,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenError {
	ExpectedToken {
		reason: &'static str,
		expected: Option<TokenKind>,
		received: Option<TokenKind>,
		line: usize,
	},
	EarlyEof,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RegisterError {
	Duplicate(char),
	Missing(char),
}

impl fmt::Display for ParseError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::TokenError(TokenError::ExpectedToken { reason, expected, received, line }) => write!(
				f,
				"line {}: {} (expected {:?}; got {:?})",
				line, reason, expected, received
			),
			Self::TokenError(TokenError::EarlyEof) => write!(f, "unexpected end of input"),
			Self::RegisterError(RegisterError::Duplicate(r)) => write!(f, "register {} given twice", r),
			Self::RegisterError(RegisterError::Missing(r)) => write!(f, "register {} is missing", r),
			Self::InvalidProgram(e) => write!(f, "invalid program: {}", e),
			Self::MissingProgram => write!(f, "no program line"),
			Self::DuplicateProgram => write!(f, "program given twice"),
		}
	}
}

impl From<ProgramError> for ParseError {
	fn from(e: ProgramError) -> Self {
		Self::InvalidProgram(e)
	}
}

impl std::error::Error for ParseError {}
impl TribitError for ParseError {}

pub type ParseResult<O = ()> = Result<O, ParseError>;
