//! Candidate move generation
//!
//! Every word the rack can spell is tried at every offset through every
//! anchor, in both directions, and kept only if [`validate`] accepts it. On
//! the first turn the only anchor is the start cell; afterwards anchors are
//! the open cells orthogonally next to a locked letter.

use super::state::SolverState;
use crate::core::{Board, Direction, Placement, Position, ScoredPlay, Word, validate};
use crate::dictionary::Dictionary;
use rustc_hash::FxHashSet;
use std::cmp::Ordering;

/// All legal plays from a state, best first
///
/// Order is score descending, then main word, then start cell and direction,
/// so equal-scoring moves always come out the same way.
pub fn candidate_moves<D: Dictionary>(state: &SolverState, dictionary: &D) -> Vec<ScoredPlay> {
    let board = state.board();
    let rack = state.rack();
    let max_len = board.size().min(rack.total());
    let words: Vec<&Word> = dictionary
        .words_up_to(max_len)
        .filter(|w| w.fits_in(rack))
        .collect();
    if words.is_empty() {
        return Vec::new();
    }

    // Keyed on the tiles laid: "at" under a locked C and "cat" through it
    // place the same letters and score the same play
    let mut seen: FxHashSet<Vec<(Position, u8)>> = FxHashSet::default();
    let mut moves = Vec::new();

    for anchor in anchors(board) {
        for direction in Direction::BOTH {
            for word in &words {
                for offset in 0..word.len() {
                    let Some(start) = anchor.offset(direction, -(offset as isize)) else {
                        break;
                    };
                    let Some(placement) = lay_word(board, start, direction, word) else {
                        continue;
                    };
                    if !seen.insert(placement_key(&placement)) {
                        continue;
                    }
                    if let Ok(play) = validate(board, &placement, dictionary) {
                        moves.push(play);
                    }
                }
            }
        }
    }

    moves.sort_by(compare_moves);
    moves
}

/// Cells a new play must pass through
fn anchors(board: &Board) -> Vec<Position> {
    if !board.has_locked_letters() {
        return vec![board.center()];
    }
    board
        .cells()
        .filter(|cell| cell.is_open())
        .map(|cell| cell.position())
        .filter(|&pos| board.neighbors(pos).any(|n| board.cell(n).locked))
        .collect()
}

/// Tiles needed to spell `word` from `start`, reusing matching board letters
///
/// `None` when the word runs off the board, hits a dead cell, clashes with a
/// board letter, or would place nothing.
fn lay_word(
    board: &Board,
    start: Position,
    direction: Direction,
    word: &Word,
) -> Option<Placement> {
    let mut tiles = Vec::with_capacity(word.len());
    for (i, &letter) in word.letters().iter().enumerate() {
        let pos = start.offset(direction, i as isize)?;
        let cell = board.get(pos)?;
        if !cell.playable {
            return None;
        }
        match cell.letter {
            Some(existing) if existing == letter => {}
            Some(_) => return None,
            None => tiles.push((pos, letter)),
        }
    }
    (!tiles.is_empty()).then(|| Placement::new(tiles))
}

/// Order-independent identity of a placement
fn placement_key(placement: &Placement) -> Vec<(Position, u8)> {
    let mut key = placement.tiles().to_vec();
    key.sort_unstable();
    key
}

/// Deterministic ranking: score, then word, then position
pub(crate) fn compare_moves(a: &ScoredPlay, b: &ScoredPlay) -> Ordering {
    let (ma, mb) = (a.main_word(), b.main_word());
    b.score
        .cmp(&a.score)
        .then_with(|| ma.text.cmp(&mb.text))
        .then_with(|| ma.start.cmp(&mb.start))
        .then_with(|| ma.direction.cmp(&mb.direction))
}
