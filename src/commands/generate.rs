//! Generate command
//!
//! Produces the puzzle for one seed phrase.

use crate::config::GeneratorConfig;
use crate::dictionary::Dictionary;
use crate::generator::{Puzzle, generate_puzzle};
use std::time::{Duration, Instant};

/// Result of generating one puzzle
#[derive(Debug, Clone)]
pub struct GenerateResult {
    pub puzzle: Puzzle,
    pub duration: Duration,
}

/// Generate the puzzle for `seed` and time it
pub fn run_generate<D: Dictionary>(
    seed: &str,
    config: &GeneratorConfig,
    dictionary: &D,
) -> GenerateResult {
    let start = Instant::now();
    let puzzle = generate_puzzle(seed, config, dictionary);
    GenerateResult {
        puzzle,
        duration: start.elapsed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::WordList;
    use crate::solver::BeamConfig;

    #[test]
    fn generate_reports_the_seed() {
        let dict = WordList::embedded();
        let config = GeneratorConfig {
            beam: BeamConfig::greedy(2),
            ..GeneratorConfig::default()
        };
        let result = run_generate("cli", &config, &dict);
        assert_eq!(result.puzzle.seed(), "cli");
        assert_eq!(result.puzzle.pool().len(), config.pool.size);
    }

    #[test]
    fn puzzle_serializes_to_json() {
        let dict = WordList::embedded();
        let config = GeneratorConfig {
            beam: BeamConfig::greedy(1),
            ..GeneratorConfig::default()
        };
        let result = run_generate("json", &config, &dict);
        let json = serde_json::to_value(&result.puzzle).unwrap();
        assert_eq!(json["seed"], "json");
        assert_eq!(json["board"]["size"], 9);
        assert!(json["pool"]["letters"].is_string());
        assert!(json["thresholds"].is_array());
    }
}
