use std::fmt;
use super::{runtime::RuntimeError, TribitError};

#[derive(Debug, Clone, PartialEq)]
pub enum SearchError {
	/// No partial seed survived the suffix check at `depth` digits.
	Exhausted { depth: usize },
	/// Full-length seeds survived but none reproduces the whole program.
	NoExactMatch,
	Runtime(RuntimeError),
}

impl fmt::Display for SearchError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Exhausted { depth } => {
				write!(f, "no seed reproduces the program (search exhausted at digit {})", depth)
			}
			Self::NoExactMatch => write!(f, "no full-length seed reproduces the program exactly"),
			Self::Runtime(e) => write!(f, "candidate run failed: {}", e),
		}
	}
}

impl From<RuntimeError> for SearchError {
	fn from(e: RuntimeError) -> Self {
		Self::Runtime(e)
	}
}

impl std::error::Error for SearchError {}
impl TribitError for SearchError {}

pub type SearchResult<O = ()> = Result<O, SearchError>;
