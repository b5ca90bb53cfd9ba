use std::fmt;
use super::TribitError;

#[derive(Debug, Clone, PartialEq)]
pub enum FileIOError {
	ExternalError(String, String),
	MalformedImage(MalformedImageError),
	MalformedHeader(MalformedHeaderError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum MalformedImageError {
	PayloadDeser(String),
	InvalidProgram(String),
	TrailingBytes(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub enum MalformedHeaderError {
	ImageDecl,
	Version,
	ImageEnd,
}

impl fmt::Display for FileIOError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Debug::fmt(&self, f)
	}
}

impl std::error::Error for FileIOError {}
impl TribitError for FileIOError {}

pub type FileIOResult<O = ()> = Result<O, FileIOError>;
