mod image;
mod instruction;
mod program;
mod scanner;

pub mod error;
pub mod fileio;
pub mod parser;
pub mod runtime;
pub mod search;

pub use image::Image;
pub use instruction::{Instruction, OperandKind};
pub use parser::{parse_image, Parser};
pub use program::Program;
pub use runtime::{simulate, simulate_bounded, Registers, Run, Runtime};
pub use scanner::TokenKind;
pub use search::{find_self_reproducing_seed, SearchOptions};

pub const TRIBIT_VER: &str = env!("CARGO_PKG_VERSION");

/// Render emitted values the way the puzzle expects them, `4,6,3`.
pub fn format_output(values: &[u8]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
