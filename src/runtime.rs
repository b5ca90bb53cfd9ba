/*
	# Machine
	A program is executed by reading the opcode under the instruction pointer together with the
	operand that follows it, applying the instruction and then moving the pointer. The machine halts
	as soon as the pointer no longer addresses a whole instruction.

	## Instruction Execution
	Every instruction is a pure transition from registers to registers plus one effect: advance,
	jump, or emit a value. The loop in [Runtime::exec] is the only place that owns mutable state.
*/

use tracing::trace;

use crate::{error::runtime::*, Instruction, Program};

mod registers;
pub use registers::*;

/// What an instruction asks the loop to do after its registers are written back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
	Advance,
	Jump(usize),
	Emit(u8),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step {
	pub registers: Registers,
	pub effect: Effect,
}

/// Outcome of a complete forward run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Run {
	pub output: Vec<u8>,
	pub registers: Registers,
	pub steps: u64,
}

/// Resolve a combo operand against the live registers.
pub fn combo(operand: u8, registers: &Registers) -> RuntimeResult<u64> {
	match operand {
		0..=3 => Ok(operand as u64),
		4 => Ok(registers.a),
		5 => Ok(registers.b),
		6 => Ok(registers.c),
		_ => malformed_bytecode!(ReservedComboOperand(operand)),
	}
}

/// `value / 2^amount`, for any amount.
pub fn shr(value: u64, amount: u64) -> u64 {
	if amount >= u64::BITS as u64 {
		0
	} else {
		value >> amount
	}
}

macro_rules! shift {
	($regs:ident.$dst:ident, $operand:expr) => {{
		let amount = combo($operand, &$regs)?;
		$regs.$dst = shr($regs.a, amount);
		Effect::Advance
	}};
}

/// Apply one instruction to a copy of `registers`.
pub fn step(instruction: Instruction, operand: u8, registers: Registers) -> RuntimeResult<Step> {
	let mut regs = registers;
	let effect = match instruction {
		Instruction::Adv => shift!(regs.a, operand),
		Instruction::Bxl => {
			regs.b ^= operand as u64;
			Effect::Advance
		}
		Instruction::Bst => {
			regs.b = combo(operand, &regs)? % 8;
			Effect::Advance
		}
		Instruction::Jnz => {
			if regs.a != 0 {
				Effect::Jump(operand as usize)
			} else {
				Effect::Advance
			}
		}
		Instruction::Bxc => {
			regs.b ^= regs.c;
			Effect::Advance
		}
		Instruction::Out => Effect::Emit((combo(operand, &regs)? % 8) as u8),
		Instruction::Bdv => shift!(regs.b, operand),
		Instruction::Cdv => shift!(regs.c, operand),
	};
	Ok(Step { registers: regs, effect })
}

pub struct Runtime<'p> {
	pub registers: Registers,
	pub ip: usize,
	pub output: Vec<u8>,
	pub steps: u64,
	program: &'p Program,
	step_limit: Option<u64>,
	trace: bool,
}

impl<'p> Runtime<'p> {
	pub fn new(registers: Registers, program: &'p Program) -> Self {
		Self {
			registers,
			ip: 0,
			output: vec![],
			steps: 0,
			program,
			step_limit: None,
			trace: false,
		}
	}

	/// Fail with [RuntimeError::StepLimitExceeded] instead of executing more than `limit`
	/// instructions. `None` runs until the program halts, however long that takes.
	pub fn step_limit(mut self, limit: Option<u64>) -> Self {
		self.step_limit = limit;
		self
	}

	pub fn trace(mut self, on: bool) -> Self {
		self.trace = on;
		self
	}

	pub fn halted(&self) -> bool {
		self.ip + 1 >= self.program.len()
	}

	pub fn exec(&mut self) -> RuntimeResult {
		while !self.halted() {
			self.tick()?;
		}
		Ok(())
	}

	/// Execute the instruction under the pointer.
	pub fn tick(&mut self) -> RuntimeResult {
		if let Some(limit) = self.step_limit {
			if self.steps >= limit {
				return Err(RuntimeError::StepLimitExceeded { limit, ip: self.ip });
			}
		}

		let digits = self.program.as_slice();
		let (opcode, operand) = (digits[self.ip], digits[self.ip + 1]);
		let instruction = match Instruction::decode(opcode) {
			Some(i) => i,
			None => return malformed_bytecode!(UnknownOpcode(opcode)),
		};
		if self.trace {
			trace!(
				ip = self.ip,
				%instruction,
				operand,
				a = self.registers.a,
				b = self.registers.b,
				c = self.registers.c,
				"step"
			);
		}

		let Step { registers, effect } = step(instruction, operand, self.registers)?;
		self.registers = registers;
		self.steps += 1;
		match effect {
			Effect::Advance => self.ip += 2,
			Effect::Jump(target) => self.ip = target,
			Effect::Emit(value) => {
				self.output.push(value);
				self.ip += 2;
			}
		}
		Ok(())
	}

	pub fn finish(self) -> Run {
		Run {
			output: self.output,
			registers: self.registers,
			steps: self.steps,
		}
	}
}

/// Run `program` to completion from `registers` and return everything it emitted.
pub fn simulate(registers: Registers, program: &Program) -> RuntimeResult<Vec<u8>> {
	Ok(simulate_bounded(registers, program, None)?.output)
}

/// Like [simulate] but keeps the final registers and honours a step budget.
pub fn simulate_bounded(registers: Registers, program: &Program, step_limit: Option<u64>) -> RuntimeResult<Run> {
	let mut runtime = Runtime::new(registers, program).step_limit(step_limit);
	runtime.exec()?;
	Ok(runtime.finish())
}

#[cfg(test)]
pub(crate) mod tests {
	use super::*;
	use pretty_assertions::assert_eq;
	use proptest::prelude::*;

	pub(crate) mod util {
		use super::*;

		pub fn program(digits: &[u8]) -> Program {
			Program::new(digits.to_vec()).unwrap()
		}

		pub fn run(a: u64, b: u64, c: u64, digits: &[u8]) -> Run {
			simulate_bounded(Registers::new(a, b, c), &program(digits), None).unwrap()
		}
	}
	use util::*;

	#[test]
	fn bst_reads_c() {
		let run = run(0, 0, 9, &[2, 6]);
		assert_eq!(run.registers.b, 1);
	}

	#[test]
	fn out_literals_and_a() {
		let run = run(10, 0, 0, &[5, 0, 5, 1, 5, 4]);
		assert_eq!(run.output, vec![0, 1, 2]);
	}

	#[test]
	fn countdown_loop() {
		let run = run(2024, 0, 0, &[0, 1, 5, 4, 3, 0]);
		assert_eq!(run.output, vec![4, 2, 5, 6, 7, 7, 7, 7, 3, 1, 0]);
		assert_eq!(run.registers.a, 0);
	}

	#[test]
	fn bxl() {
		let run = run(0, 29, 0, &[1, 7]);
		assert_eq!(run.registers.b, 26);
	}

	#[test]
	fn bxc() {
		let run = run(0, 2024, 43690, &[4, 0]);
		assert_eq!(run.registers.b, 44354);
	}

	#[test]
	fn example_program() {
		let run = run(729, 0, 0, &[0, 1, 5, 4, 3, 0]);
		assert_eq!(crate::format_output(&run.output), "4,6,3,5,6,3,5,2,1,0");
	}

	#[test]
	fn puzzle_program() {
		let run = run(41644071, 0, 0, &[2, 4, 1, 2, 7, 5, 1, 7, 4, 4, 0, 3, 5, 5, 3, 0]);
		assert_eq!(run.output, vec![3, 1, 5, 3, 7, 4, 2, 7, 5]);
		assert_eq!(run.registers, Registers::new(0, 5, 2));
	}

	#[test]
	fn shifts() {
		assert_eq!(shr(1024, 0), 1024);
		assert_eq!(shr(1024, 3), 128);
		assert_eq!(shr(u64::MAX, 64), 0);
		assert_eq!(shr(u64::MAX, u64::MAX), 0);
		// cdv by A itself: a huge shift amount is just zero
		let cdv = run(1 << 40, 0, 7, &[7, 4]);
		assert_eq!(cdv.registers.c, 0);
		let bdv = run(12, 0, 0, &[6, 0]);
		assert_eq!(bdv.registers.b, 12);
	}

	#[test]
	fn step_is_pure() {
		let before = Registers::new(8, 3, 0);
		let adv = step(Instruction::Adv, 1, before).unwrap();
		assert_eq!(before, Registers::new(8, 3, 0));
		assert_eq!(adv.registers, Registers::new(4, 3, 0));
		assert_eq!(adv.effect, Effect::Advance);

		let jump = step(Instruction::Jnz, 4, before).unwrap();
		assert_eq!(jump.effect, Effect::Jump(4));
		let fall = step(Instruction::Jnz, 4, Registers::default()).unwrap();
		assert_eq!(fall.effect, Effect::Advance);
		let emit = step(Instruction::Out, 5, before).unwrap();
		assert_eq!(emit.effect, Effect::Emit(3));
	}

	#[test]
	fn reserved_combo_operand() {
		assert_eq!(
			step(Instruction::Out, 7, Registers::default()),
			Err(RuntimeError::Bytecode(BytecodeError::ReservedComboOperand(7)))
		);
	}

	#[test]
	fn step_limit() {
		// jnz 0 with A != 0 never halts
		let p = program(&[3, 0]);
		let res = simulate_bounded(Registers::new(1, 0, 0), &p, Some(100));
		assert_eq!(res, Err(RuntimeError::StepLimitExceeded { limit: 100, ip: 0 }));
		let res = simulate_bounded(Registers::new(0, 0, 0), &p, Some(1));
		assert_eq!(res.unwrap().steps, 1);
	}

	#[test]
	fn jump_to_last_digit_halts() {
		let run = run(1, 0, 0, &[5, 4, 3, 3]);
		assert_eq!(run.output, vec![1]);
	}

	proptest! {
		#[test]
		fn prop_deterministic(
			a in any::<u64>(),
			b in any::<u64>(),
			c in any::<u64>(),
		) {
			let p = program(&[2, 4, 1, 2, 7, 5, 1, 7, 4, 4, 0, 3, 5, 5, 3, 0]);
			let regs = Registers::new(a, b, c);
			let first = simulate_bounded(regs, &p, None).unwrap();
			let second = simulate_bounded(regs, &p, None).unwrap();
			prop_assert_eq!(first, second);
		}

		/// A loop that divides A by 8 each pass runs once per octal digit of A.
		#[test]
		fn prop_terminates_per_digit(a in 1u64..u64::MAX) {
			let p = program(&[0, 3, 5, 4, 3, 0]);
			let run = simulate_bounded(Registers::new(a, 0, 0), &p, None).unwrap();
			let digits = (64 - a.leading_zeros() as u64 + 2) / 3;
			prop_assert_eq!(run.output.len() as u64, digits);
			prop_assert_eq!(run.steps, digits * 3);
		}
	}
}
