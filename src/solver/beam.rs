//! Beam-search achievability estimator

use super::moves::candidate_moves;
use super::state::{PlayRecord, SolverState};
use crate::core::{Board, LetterCounts};
use crate::dictionary::Dictionary;
use log::trace;
use serde::{Deserialize, Serialize};

/// Search bounds
///
/// Width and fan-out trade accuracy for time; neither is baked into the
/// algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeamConfig {
    /// Turn budget (T)
    pub turns: usize,
    /// States kept after each turn (W)
    pub width: usize,
    /// Moves expanded per state per turn (K)
    pub fan_out: usize,
}

impl Default for BeamConfig {
    fn default() -> Self {
        Self {
            turns: 4,
            width: 50,
            fan_out: 20,
        }
    }
}

impl BeamConfig {
    /// Cheap settings for quick checks: greedy single line
    #[must_use]
    pub const fn greedy(turns: usize) -> Self {
        Self {
            turns,
            width: 1,
            fan_out: 1,
        }
    }
}

/// Best line found by the search
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Estimate {
    /// Highest cumulative score reached
    pub score: u32,
    /// Plays of the best line, in order
    pub history: Vec<PlayRecord>,
    #[serde(skip)]
    pub final_board: Board,
    pub states_expanded: usize,
    pub moves_considered: usize,
}

/// Beam search over a board and letter pool
///
/// Coordinates the turn loop; move generation and validation live in
/// [`candidate_moves`].
pub struct BeamSolver<'a, D: Dictionary> {
    dictionary: &'a D,
    config: BeamConfig,
}

impl<'a, D: Dictionary> BeamSolver<'a, D> {
    pub const fn new(dictionary: &'a D, config: BeamConfig) -> Self {
        Self { dictionary, config }
    }

    #[must_use]
    pub const fn config(&self) -> &BeamConfig {
        &self.config
    }

    /// Run the search from an empty line of play
    ///
    /// Beam search is not monotone in its bounds in general: a wider beam can
    /// keep early high scorers that dead-end and prune a line a narrower beam
    /// would have followed. The greedy line (width 1) is searched as well and
    /// the better of the two is reported, so no setting scores below it.
    ///
    /// # Examples
    /// ```
    /// use wordtile::core::{Board, LetterCounts};
    /// use wordtile::dictionary::WordList;
    /// use wordtile::solver::{BeamConfig, BeamSolver};
    ///
    /// let dict = WordList::from_words(["cat", "at", "ta"]);
    /// let rack = LetterCounts::from_letters("cat".bytes());
    /// let solver = BeamSolver::new(&dict, BeamConfig::default());
    /// let estimate = solver.estimate(&Board::new(7), &rack);
    /// assert_eq!(estimate.score, 5);
    /// assert_eq!(estimate.history[0].word, "cat");
    /// ```
    #[must_use]
    pub fn estimate(&self, board: &Board, rack: &LetterCounts) -> Estimate {
        let beam = self.search(board, rack, self.config);
        // Width 1 already follows the top move of each turn
        if self.config.width <= 1 {
            return beam;
        }

        let floor = self.search(board, rack, BeamConfig::greedy(self.config.turns));
        let (mut best, other) = if floor.score > beam.score {
            trace!("greedy line {} beats beam {}", floor.score, beam.score);
            (floor, beam)
        } else {
            (beam, floor)
        };
        best.states_expanded += other.states_expanded;
        best.moves_considered += other.moves_considered;
        best
    }

    fn search(&self, board: &Board, rack: &LetterCounts, config: BeamConfig) -> Estimate {
        let mut beam = vec![SolverState::initial(board, *rack)];
        let mut states_expanded = 0;
        let mut moves_considered = 0;

        for turn in 1..=config.turns {
            let mut children = Vec::with_capacity(beam.len() * config.fan_out.max(1));
            let mut any_moved = false;

            for state in &beam {
                states_expanded += 1;
                let moves = candidate_moves(state, self.dictionary);
                moves_considered += moves.len();
                if moves.is_empty() {
                    children.push(state.pass());
                    continue;
                }
                any_moved = true;
                children.extend(moves.iter().take(config.fan_out).map(|m| state.play(m)));
            }

            // Stable: equal scores keep parent order, then move rank
            children.sort_by(|a, b| b.score().cmp(&a.score()));
            children.truncate(config.width.max(1));
            beam = children;

            trace!(
                "turn {turn}: {} states, best {}, {moves_considered} moves so far",
                beam.len(),
                beam.first().map_or(0, SolverState::score)
            );

            // Nobody moved, so the board is frozen for every later turn
            if !any_moved {
                break;
            }
        }

        // The beam is sorted, so its head is the best line
        let best = beam
            .into_iter()
            .next()
            .unwrap_or_else(|| SolverState::initial(board, *rack));
        let score = best.score();
        let (final_board, history) = best.into_parts();
        Estimate {
            score,
            history,
            final_board,
            states_expanded,
            moves_considered,
        }
    }
}

/// Convenience wrapper around [`BeamSolver::estimate`]
#[must_use]
pub fn estimate<D: Dictionary>(
    board: &Board,
    rack: &LetterCounts,
    config: &BeamConfig,
    dictionary: &D,
) -> Estimate {
    BeamSolver::new(dictionary, *config).estimate(board, rack)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Placement, validate};
    use crate::dictionary::WordList;

    fn small_dict() -> WordList {
        WordList::from_words([
            "at", "ta", "as", "to", "so", "oat", "cat", "act", "cot", "sat", "tas", "cast", "cats",
            "scat", "coat", "taco", "tacos", "coats", "costa",
        ])
    }

    fn bonus_board() -> Board {
        Board::from_template(&["T...T", ".d.D.", "..*..", ".D.d.", "T...T"]).unwrap()
    }

    fn run(config: BeamConfig) -> Estimate {
        let rack = LetterCounts::from_letters("catso".bytes());
        estimate(&bonus_board(), &rack, &config, &small_dict())
    }

    #[test]
    fn narrow_beams_never_beat_exhaustive_search() {
        let exhaustive = run(BeamConfig {
            turns: 3,
            width: 100_000,
            fan_out: 100_000,
        });
        for (width, fan_out) in [(1, 1), (1, 3), (3, 1), (2, 2), (5, 5), (20, 10)] {
            let narrow = run(BeamConfig {
                turns: 3,
                width,
                fan_out,
            });
            assert!(
                narrow.score <= exhaustive.score,
                "W={width} K={fan_out}: {} > {}",
                narrow.score,
                exhaustive.score
            );
        }
    }

    #[test]
    fn fan_out_never_hurts_when_width_is_unbounded() {
        // Nothing is pruned, so each turn's states are a superset of the
        // narrower fan-out's states
        let mut previous = 0;
        for fan_out in 1..=6 {
            let result = run(BeamConfig {
                turns: 3,
                width: 100_000,
                fan_out,
            });
            assert!(result.score >= previous, "K={fan_out}: {} < {previous}", result.score);
            previous = result.score;
        }
    }

    #[test]
    fn width_one_follows_the_greedy_line_for_any_fan_out() {
        let greedy = run(BeamConfig::greedy(3));
        for fan_out in [2, 5, 20] {
            let result = run(BeamConfig {
                turns: 3,
                width: 1,
                fan_out,
            });
            assert_eq!(result.score, greedy.score);
            assert_eq!(result.history, greedy.history);
        }
    }

    #[test]
    fn no_setting_scores_below_the_greedy_line() {
        let greedy = run(BeamConfig::greedy(3));
        for (width, fan_out) in [(2, 1), (2, 2), (3, 1), (5, 2), (10, 10), (50, 20)] {
            let result = run(BeamConfig {
                turns: 3,
                width,
                fan_out,
            });
            assert!(
                result.score >= greedy.score,
                "W={width} K={fan_out}: {} < {}",
                result.score,
                greedy.score
            );
        }
    }

    #[test]
    fn wider_search_is_at_least_greedy_on_one_turn() {
        // With a single turn, the widest fan-out always finds the top move
        let greedy = run(BeamConfig::greedy(1));
        let wide = run(BeamConfig {
            turns: 1,
            width: 10,
            fan_out: 10,
        });
        assert_eq!(greedy.score, wide.score);
    }

    #[test]
    fn history_replays_to_the_reported_score() {
        let dict = small_dict();
        let result = run(BeamConfig::default());
        let mut board = bonus_board();
        let mut total = 0;
        for record in &result.history {
            let tiles = record
                .tiles
                .iter()
                .map(|t| (t.position, t.letter as u8))
                .collect();
            let play = validate(&board, &Placement::new(tiles), &dict).unwrap();
            assert_eq!(play.score, record.score);
            assert!(record.words.iter().all(|w| dict.contains(w)));
            total += play.score;
            board = crate::core::apply(&board, &play);
        }
        assert_eq!(total, result.score);
        assert_eq!(board, result.final_board);
    }

    #[test]
    fn rack_letters_are_never_overspent() {
        let result = run(BeamConfig::default());
        let placed: usize = result.history.iter().map(|r| r.tiles.len()).sum();
        assert!(placed <= 5);
    }

    #[test]
    fn no_moves_means_zero() {
        let dict = WordList::from_words(["zzz"]);
        let rack = LetterCounts::from_letters("abc".bytes());
        let result = estimate(&Board::new(5), &rack, &BeamConfig::default(), &dict);
        assert_eq!(result.score, 0);
        assert!(result.history.is_empty());
        // Frozen after the first turn, in both the beam and the greedy line
        assert_eq!(result.states_expanded, 2);
    }

    #[test]
    fn search_is_deterministic() {
        let a = run(BeamConfig::default());
        let b = run(BeamConfig::default());
        assert_eq!(a, b);
    }

    #[test]
    fn turn_budget_limits_plays() {
        let result = run(BeamConfig {
            turns: 2,
            ..BeamConfig::default()
        });
        assert!(result.history.len() <= 2);
    }
}
