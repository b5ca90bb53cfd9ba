//! Inverse of the machine: find the smallest A that makes a program print itself.
//!
//! The programs this works for shift A right by three bits once per loop and emit one
//! value per pass, derived from the low bits of A at that point. The first value printed
//! therefore depends on every octal digit of the seed while the last one depends only on
//! the most significant digit. Seeds are built most significant digit first, matching the
//! program from its tail towards its head, and a partial seed survives a generation only if
//! its output already ends with the matching tail of the program. Appending a lower digit
//! adds one more loop pass at the front and leaves the tail alone, so a partial seed that
//! fails the check can never be completed.

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::{
    error::{runtime::RuntimeResult, search::*},
    runtime::{simulate_bounded, Registers},
    Program,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchOptions {
    pub initial_b: u64,
    pub initial_c: u64,
    /// Budget for every candidate run. `None` trusts the program to halt.
    pub step_limit: Option<u64>,
    /// Evaluate the candidates of a generation on the rayon pool.
    pub parallel: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            initial_b: 0,
            initial_c: 0,
            step_limit: None,
            parallel: true,
        }
    }
}

/// Every `partial * 8 + digit` for the live frontier, digits ascending.
fn expand(frontier: &[u64]) -> Vec<u64> {
    frontier
        .iter()
        .flat_map(|partial| {
            (0..8u64).filter_map(move |digit| partial.checked_mul(8).and_then(|p| p.checked_add(digit)))
        })
        .collect()
}

/// Does the output for `seed` end with the last `depth` digits of the program?
fn matches_tail(
    seed: u64,
    program: &Program,
    depth: usize,
    options: &SearchOptions,
) -> RuntimeResult<bool> {
    let registers = Registers::new(seed, options.initial_b, options.initial_c);
    let run = simulate_bounded(registers, program, options.step_limit)?;
    let target = program.as_slice();
    Ok(run.output.len() >= depth && run.output[run.output.len() - depth..] == target[target.len() - depth..])
}

/// Keep the candidates whose output matches the program's tail, in candidate order.
fn survivors(
    candidates: &[u64],
    program: &Program,
    depth: usize,
    options: &SearchOptions,
) -> SearchResult<Vec<u64>> {
    let verdicts: Vec<RuntimeResult<bool>> = if options.parallel {
        candidates
            .par_iter()
            .map(|&seed| matches_tail(seed, program, depth, options))
            .collect()
    } else {
        candidates
            .iter()
            .map(|&seed| matches_tail(seed, program, depth, options))
            .collect()
    };

    let mut live = Vec::new();
    for (&seed, verdict) in candidates.iter().zip(verdicts) {
        if verdict? {
            live.push(seed);
        }
    }
    Ok(live)
}

/// Smallest A that makes `program` emit exactly its own digits.
pub fn find_self_reproducing_seed(program: &Program, options: &SearchOptions) -> SearchResult<u64> {
    let mut frontier = vec![0u64];
    for depth in 1..=program.len() {
        let candidates = expand(&frontier);
        frontier = survivors(&candidates, program, depth, options)?;
        debug!(depth, candidates = candidates.len(), live = frontier.len(), "search generation");
        if frontier.is_empty() {
            warn!(depth, "quine search exhausted");
            return Err(SearchError::Exhausted { depth });
        }
    }

    // Every survivor matches a suffix as long as the program. Only an exact
    // match counts, and the frontier is already ascending.
    for seed in frontier {
        let registers = Registers::new(seed, options.initial_b, options.initial_c);
        let run = simulate_bounded(registers, program, options.step_limit)?;
        if run.output == program.as_slice() {
            return Ok(seed);
        }
    }
    Err(SearchError::NoExactMatch)
}
