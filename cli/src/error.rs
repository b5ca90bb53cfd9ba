use std::fmt;

use tribit::error::TribitError;

#[derive(Debug, Clone, PartialEq)]
pub enum CLIError {
	ExternalError(String, String),
	NotFound(String),
}

impl CLIError {
	pub fn external<E: TribitError>(kind: &str, e: E) -> Self {
		Self::ExternalError(kind.into(), e.to_string())
	}
}

impl fmt::Display for CLIError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::ExternalError(kind, msg) => write!(f, "{}: {}", kind, msg),
			Self::NotFound(path) => write!(f, "no such file: {}", path),
		}
	}
}

pub type CLIResult<O = ()> = Result<O, CLIError>;
