//! Benchmark command
//!
//! Generates puzzles for many seeds in parallel and summarizes acceptance,
//! estimates, and archetype mix. Each generation stays single-threaded and
//! deterministic; only independent seeds run concurrently.

use crate::config::GeneratorConfig;
use crate::dictionary::Dictionary;
use crate::generator::{Archetype, Origin, Puzzle, generate_puzzle};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Result of a benchmark run
#[derive(Debug)]
pub struct BenchmarkResult {
    pub total_puzzles: usize,
    pub generated: usize,
    pub fallbacks: usize,
    pub average_estimate: f64,
    pub min_estimate: u32,
    pub max_estimate: u32,
    pub average_attempts: f64,
    pub archetypes: HashMap<Archetype, usize>,
    pub duration: Duration,
    pub puzzles_per_second: f64,
}

/// Seed phrases `prefix-1` through `prefix-count`
#[must_use]
pub fn benchmark_seeds(prefix: &str, count: usize) -> Vec<String> {
    (1..=count).map(|i| format!("{prefix}-{i}")).collect()
}

/// Generate one puzzle per seed, in parallel, with a progress bar
///
/// Results are summarized in seed order, so the statistics do not depend on
/// scheduling.
pub fn run_benchmark<D: Dictionary + Sync>(
    seeds: &[String],
    config: &GeneratorConfig,
    dictionary: &D,
    show_progress: bool,
) -> BenchmarkResult {
    let pb = if show_progress {
        let pb = ProgressBar::new(seeds.len() as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}")
        {
            pb.set_style(style.progress_chars("█▓▒░"));
        }
        pb
    } else {
        ProgressBar::hidden()
    };

    let start = Instant::now();
    let puzzles: Vec<Puzzle> = seeds
        .par_iter()
        .map(|seed| {
            let puzzle = generate_puzzle(seed, config, dictionary);
            pb.inc(1);
            puzzle
        })
        .collect();
    pb.finish_with_message("Complete!");

    summarize(&puzzles, start.elapsed())
}

fn summarize(puzzles: &[Puzzle], duration: Duration) -> BenchmarkResult {
    let total_puzzles = puzzles.len();
    let attempts: Vec<usize> = puzzles
        .iter()
        .filter_map(|p| match p.origin() {
            Origin::Generated { attempt } => Some(attempt),
            Origin::Fallback => None,
        })
        .collect();
    let generated = attempts.len();

    let mut archetypes: HashMap<Archetype, usize> = HashMap::new();
    for puzzle in puzzles.iter().filter(|p| !p.is_fallback()) {
        *archetypes.entry(puzzle.archetype()).or_insert(0) += 1;
    }

    let estimates = puzzles.iter().map(Puzzle::estimate);
    let total_estimate: u64 = estimates.clone().map(u64::from).sum();

    BenchmarkResult {
        total_puzzles,
        generated,
        fallbacks: total_puzzles - generated,
        average_estimate: if total_puzzles > 0 {
            total_estimate as f64 / total_puzzles as f64
        } else {
            0.0
        },
        min_estimate: estimates.clone().min().unwrap_or(0),
        max_estimate: estimates.max().unwrap_or(0),
        average_attempts: if generated > 0 {
            attempts.iter().sum::<usize>() as f64 / generated as f64
        } else {
            0.0
        },
        archetypes,
        duration,
        puzzles_per_second: total_puzzles as f64 / duration.as_secs_f64().max(f64::EPSILON),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::WordList;
    use crate::generator::AcceptanceBand;
    use crate::solver::BeamConfig;

    fn quick_config() -> GeneratorConfig {
        GeneratorConfig {
            beam: BeamConfig::greedy(2),
            acceptance: AcceptanceBand { min: 1, max: 10_000 },
            ..GeneratorConfig::default()
        }
    }

    #[test]
    fn seeds_are_numbered_from_one() {
        assert_eq!(benchmark_seeds("day", 3), ["day-1", "day-2", "day-3"]);
        assert!(benchmark_seeds("day", 0).is_empty());
    }

    #[test]
    fn benchmark_counts_every_seed() {
        let dict = WordList::embedded();
        let seeds = benchmark_seeds("bench", 4);
        let result = run_benchmark(&seeds, &quick_config(), &dict, false);

        assert_eq!(result.total_puzzles, 4);
        assert_eq!(result.generated + result.fallbacks, 4);
        let archetype_sum: usize = result.archetypes.values().sum();
        assert_eq!(archetype_sum, result.generated);
        assert!(result.min_estimate as f64 <= result.average_estimate);
        assert!(result.average_estimate <= result.max_estimate as f64);
    }

    #[test]
    fn parallel_run_matches_sequential_generation() {
        let dict = WordList::embedded();
        let config = quick_config();
        let seeds = benchmark_seeds("order", 3);
        let result = run_benchmark(&seeds, &config, &dict, false);
        let sequential: u32 = seeds
            .iter()
            .map(|s| generate_puzzle(s, &config, &dict).estimate())
            .max()
            .unwrap();
        assert_eq!(result.max_estimate, sequential);
    }

    #[test]
    fn empty_benchmark() {
        let dict = WordList::embedded();
        let result = run_benchmark(&[], &quick_config(), &dict, false);
        assert_eq!(result.total_puzzles, 0);
        assert_eq!(result.average_estimate, 0.0);
        assert_eq!(result.min_estimate, 0);
    }
}
