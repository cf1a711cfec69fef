//! Generation attempts and the accept/reject gate
//!
//! One attempt runs shape, bonuses, pool, and estimate in order. Local
//! constraint misses (small region, bonus shortfall, bad pool draw) are
//! retried inside the attempt; an estimate outside the acceptance band ends
//! the attempt. When every attempt fails, or the time budget runs out, the
//! hand-authored fallback puzzle is returned instead.

use super::bonus::place_bonuses;
use super::fallback::fallback_puzzle;
use super::outcome::{Outcome, Reason, retry};
use super::pool::generate_pool;
use super::puzzle::{Origin, Puzzle, derive_thresholds};
use super::shape::{Archetype, generate_shape};
use crate::config::GeneratorConfig;
use crate::core::{Board, PuzzleRng};
use crate::dictionary::Dictionary;
use crate::solver::estimate;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Inclusive range of acceptable estimates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcceptanceBand {
    pub min: u32,
    pub max: u32,
}

impl Default for AcceptanceBand {
    fn default() -> Self {
        Self { min: 40, max: 400 }
    }
}

impl AcceptanceBand {
    /// Gate an estimate; out-of-band is a whole-attempt failure
    ///
    /// # Examples
    /// ```
    /// use wordtile::generator::{AcceptanceBand, Outcome};
    ///
    /// let band = AcceptanceBand { min: 50, max: 150 };
    /// assert!(band.check(80).is_success());
    /// assert!(matches!(band.check(200), Outcome::Fail(_)));
    /// ```
    pub fn check(&self, estimate: u32) -> Outcome<()> {
        if (self.min..=self.max).contains(&estimate) {
            Outcome::Success(())
        } else {
            Outcome::Fail(Reason::EstimateOutOfBand {
                estimate,
                min: self.min,
                max: self.max,
            })
        }
    }
}

/// Generate the puzzle for a seed phrase
///
/// Deterministic for a given seed, configuration, and dictionary unless the
/// time budget cuts generation short. Never fails: the worst case is the
/// fallback puzzle.
///
/// # Examples
/// ```no_run
/// use wordtile::config::GeneratorConfig;
/// use wordtile::dictionary::WordList;
/// use wordtile::generator::generate_puzzle;
///
/// let dict = WordList::embedded();
/// let puzzle = generate_puzzle("2026-10-19", &GeneratorConfig::default(), &dict);
/// println!("{} letters, estimate {}", puzzle.pool(), puzzle.estimate());
/// ```
pub fn generate_puzzle<D: Dictionary>(
    seed: &str,
    config: &GeneratorConfig,
    dictionary: &D,
) -> Puzzle {
    let started = Instant::now();
    let budget = config.time_budget_ms.map(Duration::from_millis);
    let mut rng = PuzzleRng::from_phrase(seed);

    for attempt in 1..=config.max_attempts {
        if budget.is_some_and(|b| started.elapsed() >= b) {
            debug!("{seed}: {} before attempt {attempt}", Reason::TimeBudgetExceeded);
            break;
        }

        let mut attempt_rng = rng.fork();
        match run_attempt(seed, attempt, config, dictionary, &mut attempt_rng) {
            Outcome::Success(puzzle) => {
                info!(
                    "{seed}: accepted {} puzzle on attempt {attempt}, estimate {}",
                    puzzle.archetype(),
                    puzzle.estimate()
                );
                return puzzle;
            }
            Outcome::Retry(reason) | Outcome::Fail(reason) => {
                debug!("{seed}: attempt {attempt} rejected: {reason}");
            }
        }
    }

    debug!("{seed}: falling back to the hand-authored puzzle");
    fallback_puzzle(seed, config, dictionary)
}

/// One full attempt: layout, pool, estimate, gate
pub fn run_attempt<D: Dictionary>(
    seed: &str,
    attempt: usize,
    config: &GeneratorConfig,
    dictionary: &D,
    rng: &mut PuzzleRng,
) -> Outcome<Puzzle> {
    let (board, archetype) = match retry("layout", config.layout_retries, |_| layout(config, rng)) {
        Outcome::Success(layout) => layout,
        Outcome::Retry(reason) | Outcome::Fail(reason) => return Outcome::Fail(reason),
    };

    let pool = generate_pool(&config.pool, dictionary, rng);
    let result = estimate(&board, pool.counts(), &config.beam, dictionary);

    if let Outcome::Fail(reason) | Outcome::Retry(reason) = config.acceptance.check(result.score) {
        return Outcome::Fail(reason);
    }

    let thresholds = derive_thresholds(result.score, &config.thresholds);
    Outcome::Success(Puzzle::new(
        seed,
        board,
        pool,
        archetype,
        result.score,
        thresholds,
        Origin::Generated { attempt },
        result.history,
    ))
}

/// Carve a shape and tag its bonuses; a bonus shortfall asks for a new shape
fn layout(config: &GeneratorConfig, rng: &mut PuzzleRng) -> Outcome<(Board, Archetype)> {
    let shape = match generate_shape(config.board_size, &config.shape, rng) {
        Outcome::Success(shape) => shape,
        Outcome::Retry(reason) => return Outcome::Retry(reason),
        Outcome::Fail(reason) => return Outcome::Fail(reason),
    };

    let bonuses = place_bonuses(&shape.board, &config.bonus, rng);
    if let Some(short) = bonuses.shortfall() {
        return Outcome::Retry(Reason::BonusShortfall {
            tier: short.tier,
            placed: short.placed,
            target: short.target,
        });
    }
    Outcome::Success((bonuses.board, shape.archetype))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Bonus, LetterCounts};
    use crate::dictionary::WordList;
    use crate::solver::BeamConfig;

    /// Small beam so full pipeline runs stay quick
    fn quick_config() -> GeneratorConfig {
        GeneratorConfig {
            beam: BeamConfig {
                turns: 2,
                width: 4,
                fan_out: 4,
            },
            acceptance: AcceptanceBand { min: 1, max: 10_000 },
            ..GeneratorConfig::default()
        }
    }

    #[test]
    fn scenario_test_1() {
        let dict = WordList::embedded();
        let config = GeneratorConfig::default();
        let mut rng = PuzzleRng::from_phrase("test-1");

        let (board, _) = retry("layout", config.layout_retries, |_| layout(&config, &mut rng))
            .success()
            .unwrap();
        assert_eq!(board.size(), 9);
        assert!(board.is_symmetric());
        assert_eq!(board.reachable_count(), board.playable_count());

        let pool = generate_pool(&config.pool, &dict, &mut rng);
        assert_eq!(pool.len(), 14);
        assert!((4..=6).contains(&pool.counts().vowels()));
        assert!(pool.counts().max_duplicates() <= 2);

        let beam = BeamConfig {
            turns: 4,
            width: 50,
            fan_out: 20,
        };
        let result = estimate(&board, pool.counts(), &beam, &dict);
        assert!(result.score > 0);
        for record in &result.history {
            for word in &record.words {
                assert!(dict.contains(word), "{word} is not a word");
            }
        }
        let spent = LetterCounts::from_letters(
            result
                .history
                .iter()
                .flat_map(|r| r.tiles.iter().map(|t| t.letter as u8)),
        );
        assert!(pool.counts().contains(&spent));

        // Narrower bounds on the same board and letters never score higher
        for narrow in [BeamConfig::greedy(4), BeamConfig { width: 1, ..beam }] {
            let narrow_result = estimate(&board, pool.counts(), &narrow, &dict);
            assert!(
                result.score >= narrow_result.score,
                "W={} K={}: {} > {}",
                narrow.width,
                narrow.fan_out,
                narrow_result.score,
                result.score
            );
        }
    }

    #[test]
    fn accepted_puzzle_meets_every_invariant() {
        let dict = WordList::embedded();
        let config = quick_config();
        let puzzle = generate_puzzle("accept", &config, &dict);

        assert!(matches!(puzzle.origin(), Origin::Generated { .. }));
        let board = puzzle.board();
        assert!(board.is_symmetric());
        assert_eq!(board.bonus_count(Bonus::Start), 1);
        for policy in &config.bonus.tiers {
            assert_eq!(board.bonus_count(policy.tier), policy.count);
        }
        assert!(puzzle.estimate() >= 1);
        assert_eq!(puzzle.thresholds().len(), 3);
        assert!(!board.has_locked_letters());
    }

    #[test]
    fn same_seed_same_puzzle() {
        let dict = WordList::embedded();
        let config = quick_config();
        let a = generate_puzzle("repeat", &config, &dict);
        let b = generate_puzzle("repeat", &config, &dict);
        assert_eq!(a, b);
    }

    #[test]
    fn impossible_band_resolves_to_fallback() {
        let dict = WordList::embedded();
        let config = GeneratorConfig {
            acceptance: AcceptanceBand {
                min: 50_000,
                max: 60_000,
            },
            max_attempts: 2,
            ..quick_config()
        };
        let puzzle = generate_puzzle("too-hard", &config, &dict);
        assert!(puzzle.is_fallback());
        assert_eq!(puzzle.seed(), "too-hard");
    }

    #[test]
    fn exhausted_time_budget_resolves_to_fallback() {
        let dict = WordList::embedded();
        let config = GeneratorConfig {
            time_budget_ms: Some(0),
            ..quick_config()
        };
        assert!(generate_puzzle("no-time", &config, &dict).is_fallback());
    }

    #[test]
    fn band_is_inclusive() {
        let band = AcceptanceBand { min: 10, max: 20 };
        assert!(band.check(10).is_success());
        assert!(band.check(20).is_success());
        assert!(matches!(
            band.check(9),
            Outcome::Fail(Reason::EstimateOutOfBand { estimate: 9, .. })
        ));
    }

    #[test]
    fn layout_shortfall_is_retried() {
        let mut config = quick_config();
        config.bonus.tiers[0].count = 500;
        let mut rng = PuzzleRng::from_phrase("crowded");
        assert!(matches!(
            layout(&config, &mut rng),
            Outcome::Retry(Reason::BonusShortfall { .. })
        ));
    }
}
