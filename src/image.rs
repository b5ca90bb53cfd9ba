use serde::{Deserialize, Serialize};

use crate::{runtime::Registers, Program};

/// Everything needed to start a run: initial registers and the program.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Image {
    pub registers: Registers,
    pub program: Program,
}
