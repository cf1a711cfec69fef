//! Immutable search state

use crate::core::{Board, Direction, LetterCounts, Position, ScoredPlay, apply};
use serde::Serialize;

/// One tile put down by a recorded play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlacedTile {
    pub position: Position,
    pub letter: char,
}

/// A committed play in a solver line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayRecord {
    pub turn: usize,
    /// Main word
    pub word: String,
    pub start: Position,
    pub direction: Direction,
    /// Every word formed, main word first
    pub words: Vec<String>,
    pub tiles: Vec<PlacedTile>,
    pub score: u32,
}

impl PlayRecord {
    fn from_play(turn: usize, play: &ScoredPlay) -> Self {
        let main = play.main_word();
        Self {
            turn,
            word: main.text.clone(),
            start: main.start,
            direction: main.direction,
            words: play.words.iter().map(|w| w.text.clone()).collect(),
            tiles: play
                .placement
                .tiles()
                .iter()
                .map(|&(position, letter)| PlacedTile {
                    position,
                    letter: char::from(letter),
                })
                .collect(),
            score: play.score,
        }
    }

    /// Lock this play's tiles onto a copy of `board`
    #[must_use]
    pub fn apply_to(&self, board: &Board) -> Board {
        let mut next = board.clone();
        for tile in &self.tiles {
            let cell = next.cell_mut(tile.position);
            cell.letter = Some(tile.letter as u8);
            cell.locked = true;
        }
        next
    }
}

/// Snapshot of one line of play
///
/// States are never mutated; [`SolverState::play`] and [`SolverState::pass`]
/// return new states, so sibling branches never share anything mutable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverState {
    board: Board,
    rack: LetterCounts,
    score: u32,
    turns_used: usize,
    history: Vec<PlayRecord>,
}

impl SolverState {
    /// Starting state: empty history, full rack
    #[must_use]
    pub fn initial(board: &Board, rack: LetterCounts) -> Self {
        Self {
            board: board.clone(),
            rack,
            score: 0,
            turns_used: 0,
            history: Vec::new(),
        }
    }

    /// State after committing a validated play
    ///
    /// Placed letters leave the rack; the play must come from this state's
    /// board and rack.
    #[must_use]
    pub fn play(&self, play: &ScoredPlay) -> Self {
        let mut rack = self.rack;
        for &(_, letter) in play.placement.tiles() {
            rack.remove(letter);
        }
        let mut history = self.history.clone();
        history.push(PlayRecord::from_play(self.turns_used + 1, play));
        Self {
            board: apply(&self.board, play),
            rack,
            score: self.score + play.score,
            turns_used: self.turns_used + 1,
            history,
        }
    }

    /// State carried into the next turn without a move
    #[must_use]
    pub fn pass(&self) -> Self {
        Self {
            turns_used: self.turns_used + 1,
            ..self.clone()
        }
    }

    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub const fn rack(&self) -> &LetterCounts {
        &self.rack
    }

    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub const fn turns_used(&self) -> usize {
        self.turns_used
    }

    #[must_use]
    pub fn history(&self) -> &[PlayRecord] {
        &self.history
    }

    /// Consume the state, keeping its line and final board
    #[must_use]
    pub fn into_parts(self) -> (Board, Vec<PlayRecord>) {
        (self.board, self.history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Placement, validate};
    use crate::dictionary::WordList;

    fn opening() -> (SolverState, ScoredPlay) {
        let dict = WordList::from_words(["cat"]);
        let board = Board::new(7);
        let rack = LetterCounts::from_letters("cataxyz".bytes());
        let play = validate(
            &board,
            &Placement::from_word(Position::new(3, 2), Direction::Across, "cat"),
            &dict,
        )
        .unwrap();
        (SolverState::initial(&board, rack), play)
    }

    #[test]
    fn play_builds_a_new_state() {
        let (state, play) = opening();
        let next = state.play(&play);

        assert_eq!(next.score(), 5);
        assert_eq!(next.turns_used(), 1);
        assert_eq!(next.rack(), &LetterCounts::from_letters("axyz".bytes()));
        assert_eq!(next.board().letter_at(Position::new(3, 2)), Some(b'c'));
        assert_eq!(next.history().len(), 1);
        assert_eq!(next.history()[0].word, "cat");
        assert_eq!(next.history()[0].tiles.len(), 3);

        // The parent is untouched
        assert_eq!(state.score(), 0);
        assert!(!state.board().has_locked_letters());
        assert!(state.history().is_empty());
    }

    #[test]
    fn records_replay_onto_a_board() {
        let (state, play) = opening();
        let next = state.play(&play);
        let replayed = next.history()[0].apply_to(state.board());
        assert_eq!(&replayed, next.board());
    }

    #[test]
    fn pass_only_advances_the_turn() {
        let (state, play) = opening();
        let played = state.play(&play);
        let passed = played.pass();
        assert_eq!(passed.turns_used(), 2);
        assert_eq!(passed.score(), played.score());
        assert_eq!(passed.board(), played.board());
        assert_eq!(passed.history(), played.history());
    }
}
