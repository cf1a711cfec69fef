//! Estimate command
//!
//! Re-runs the beam search on a generated puzzle with different bounds, to
//! see how width and fan-out move the estimate and the cost.

use crate::config::GeneratorConfig;
use crate::dictionary::Dictionary;
use crate::generator::{Puzzle, generate_puzzle};
use crate::solver::{BeamConfig, BeamSolver, Estimate};
use std::time::{Duration, Instant};

/// Result of re-estimating one puzzle
#[derive(Debug, Clone)]
pub struct EstimateResult {
    pub puzzle: Puzzle,
    pub beam: BeamConfig,
    pub estimate: Estimate,
    pub duration: Duration,
}

impl EstimateResult {
    /// Signed difference from the estimate the puzzle was accepted with
    #[must_use]
    pub fn drift(&self) -> i64 {
        i64::from(self.estimate.score) - i64::from(self.puzzle.estimate())
    }
}

/// Generate the puzzle for `seed`, then search it again with `beam`
pub fn run_estimate<D: Dictionary>(
    seed: &str,
    config: &GeneratorConfig,
    beam: BeamConfig,
    dictionary: &D,
) -> EstimateResult {
    let puzzle = generate_puzzle(seed, config, dictionary);
    let solver = BeamSolver::new(dictionary, beam);

    let start = Instant::now();
    let estimate = solver.estimate(puzzle.board(), puzzle.pool().counts());
    EstimateResult {
        puzzle,
        beam,
        estimate,
        duration: start.elapsed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::WordList;

    #[test]
    fn same_bounds_reproduce_the_puzzle_estimate() {
        let dict = WordList::embedded();
        let beam = BeamConfig {
            turns: 2,
            width: 3,
            fan_out: 3,
        };
        let config = GeneratorConfig {
            beam,
            ..GeneratorConfig::default()
        };
        let result = run_estimate("again", &config, beam, &dict);
        assert_eq!(result.estimate.score, result.puzzle.estimate());
        assert_eq!(result.drift(), 0);
        assert_eq!(result.estimate.history, result.puzzle.best_line());
    }
}
