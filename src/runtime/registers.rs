use serde::{Deserialize, Serialize};

/// The three general purpose registers of the machine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Registers {
	pub a: u64,
	pub b: u64,
	pub c: u64,
}

impl Registers {
	pub fn new(a: u64, b: u64, c: u64) -> Self {
		Self { a, b, c }
	}

	/// Same B and C, different A. Used when trying seeds.
	pub fn with_a(self, a: u64) -> Self {
		Self { a, ..self }
	}
}
