//! Hand-authored puzzle used when generation gives up

use super::pool::fallback_pool;
use super::puzzle::{Origin, Puzzle, derive_thresholds};
use super::shape::Archetype;
use crate::config::GeneratorConfig;
use crate::core::Board;
use crate::dictionary::Dictionary;
use crate::solver::estimate;
use log::warn;

/// 9x9 board with symmetric corner cuts
const FALLBACK_BOARD: [&str; 9] = [
    "##T.d.T##",
    "#D...t.D#",
    "T.d...d.T",
    "...t.t...",
    "d...*...d",
    "...t.t...",
    "T.d...d.T",
    "#D.t...D#",
    "##T.d.T##",
];

/// The fixed board of the fallback puzzle
#[must_use]
pub fn fallback_board() -> Board {
    Board::from_template(&FALLBACK_BOARD).unwrap_or_else(|err| {
        warn!("fallback template rejected ({err}), using an open board");
        Board::new(FALLBACK_BOARD.len())
    })
}

/// Build the fallback puzzle
///
/// The board is fixed and the letters are the first vetted set fitted to
/// the configured pool size. The estimate is still computed so the
/// thresholds match what the solver can reach. The acceptance band is not
/// applied.
pub fn fallback_puzzle<D: Dictionary>(
    seed: &str,
    config: &GeneratorConfig,
    dictionary: &D,
) -> Puzzle {
    let board = fallback_board();
    let pool = fallback_pool(&config.pool, 0);
    let result = estimate(&board, pool.counts(), &config.beam, dictionary);
    let thresholds = derive_thresholds(result.score, &config.thresholds);
    Puzzle::new(
        seed,
        board,
        pool,
        Archetype::Open,
        result.score,
        thresholds,
        Origin::Fallback,
        result.history,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Bonus;
    use crate::dictionary::WordList;
    use crate::generator::generate_puzzle;
    use crate::solver::BeamConfig;

    #[test]
    fn template_is_a_valid_board() {
        assert!(Board::from_template(&FALLBACK_BOARD).is_ok());
        let board = fallback_board();
        assert!(board.is_symmetric());
        assert_eq!(board.reachable_count(), board.playable_count());
        assert_eq!(board.bonus_count(Bonus::Start), 1);
        assert_eq!(board.bonus_count(Bonus::TripleWord), 8);
    }

    #[test]
    fn fallback_puzzle_is_playable() {
        let dict = WordList::embedded();
        let config = GeneratorConfig {
            beam: BeamConfig {
                turns: 2,
                width: 4,
                fan_out: 4,
            },
            ..GeneratorConfig::default()
        };
        let puzzle = fallback_puzzle("fallback", &config, &dict);
        assert!(puzzle.is_fallback());
        assert_eq!(puzzle.pool().letters(), "aeeiorstnldcpm");
        assert!(puzzle.estimate() > 0);
        assert_eq!(puzzle.thresholds().len(), config.thresholds.len());
        assert!(!puzzle.best_line().is_empty());
    }

    #[test]
    fn fallback_letters_follow_the_configured_pool_size() {
        let dict = WordList::embedded();
        let mut config = GeneratorConfig {
            beam: BeamConfig::greedy(2),
            time_budget_ms: Some(0),
            ..GeneratorConfig::default()
        };
        config.pool.size = 10;

        let puzzle = generate_puzzle("short-pool", &config, &dict);
        assert!(puzzle.is_fallback());
        assert_eq!(puzzle.pool().len(), 10);
        let counts = puzzle.pool().counts();
        assert!((config.pool.min_vowels..=config.pool.max_vowels).contains(&counts.vowels()));
        assert!(counts.max_duplicates() <= config.pool.max_duplicates);
    }
}
