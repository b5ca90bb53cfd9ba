use std::fmt;

pub mod fileio;
pub mod parser;
pub mod program;
pub mod runtime;
pub mod search;

/// Marker for every error the crate hands back to a caller.
pub trait TribitError: fmt::Debug + fmt::Display {}
