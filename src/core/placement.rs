//! Placement validation, word extraction, and scoring
//!
//! A placement is a set of tiles the player proposes to put down in one turn.
//! [`validate`] is a pure function of the board, the placement, and the
//! dictionary: it either returns every word formed together with its score,
//! or rejects the whole placement with the first rule it breaks.

use super::board::{Board, Direction, Position};
use super::letters::{is_letter, letter_value};
use crate::dictionary::Dictionary;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Tiles proposed for one turn, not yet committed to the board
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Placement {
    tiles: Vec<(Position, u8)>,
}

impl Placement {
    #[must_use]
    pub const fn new(tiles: Vec<(Position, u8)>) -> Self {
        Self { tiles }
    }

    /// Lay out `word` from `start` along `direction`
    ///
    /// Every letter becomes a tile; use [`Placement::new`] to skip cells that
    /// already hold letters.
    #[must_use]
    pub fn from_word(start: Position, direction: Direction, word: &str) -> Self {
        let tiles = word
            .bytes()
            .enumerate()
            .filter_map(|(i, letter)| {
                start
                    .offset(direction, i as isize)
                    .map(|pos| (pos, letter.to_ascii_lowercase()))
            })
            .collect();
        Self { tiles }
    }

    #[must_use]
    pub fn tiles(&self) -> &[(Position, u8)] {
        &self.tiles
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    fn covers(&self, pos: Position) -> bool {
        self.tiles.iter().any(|&(p, _)| p == pos)
    }
}

/// Why a placement was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("placement has no tiles")]
    Empty,
    #[error("{0:?} is not a letter")]
    NotALetter(char),
    #[error("cell {0} is off the board")]
    OutOfBounds(Position),
    #[error("cell {0} is placed twice")]
    DuplicateCell(Position),
    #[error("cell {0} is not playable")]
    NotPlayable(Position),
    #[error("cell {0} is already filled")]
    Occupied(Position),
    #[error("tiles must share a single row or column")]
    NotInLine,
    #[error("tiles leave a gap at {0}")]
    Gap(Position),
    #[error("first word must cover the start cell")]
    MissesStart,
    #[error("placement must touch an existing word")]
    Disconnected,
    #[error("placement forms no word of two or more letters")]
    TooShort,
    #[error("{0} is not in the dictionary")]
    NotAWord(String),
}

/// One word formed by a placement
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormedWord {
    pub text: String,
    pub start: Position,
    pub direction: Direction,
    pub score: u32,
}

/// A validated placement: main word first, then cross words in tile order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredPlay {
    pub placement: Placement,
    pub direction: Direction,
    pub words: Vec<FormedWord>,
    pub score: u32,
}

impl ScoredPlay {
    /// The word laid along the play direction
    #[must_use]
    pub fn main_word(&self) -> &FormedWord {
        &self.words[0]
    }
}

impl fmt::Display for ScoredPlay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let main = self.main_word();
        write!(
            f,
            "{} {} {:?} for {}",
            main.text.to_uppercase(),
            main.start,
            main.direction,
            self.score
        )
    }
}

/// Validate, extract, and score a placement
///
/// Rules are checked in order and the first failure rejects the placement:
/// cells are on-board, playable and empty; tiles share one line; the line
/// has no gaps; the first play covers the start cell and later plays touch a
/// locked letter; every formed word is in the dictionary.
///
/// # Errors
/// Returns the `PlacementError` for the first rule broken.
///
/// # Examples
/// ```
/// use wordtile::core::{validate, Board, Direction, Placement, Position};
/// use wordtile::dictionary::WordList;
///
/// let dict = WordList::from_words(["cat"]);
/// let board = Board::new(5);
/// let play = Placement::from_word(Position::new(2, 1), Direction::Across, "cat");
/// let scored = validate(&board, &play, &dict).unwrap();
/// assert_eq!(scored.score, 5); // C3 + A1 + T1
/// ```
pub fn validate<D: Dictionary>(
    board: &Board,
    placement: &Placement,
    dictionary: &D,
) -> Result<ScoredPlay, PlacementError> {
    let direction = check_geometry(board, placement)?;
    check_connectivity(board, placement)?;

    let words = extract_words(board, placement, direction);
    if words.is_empty() {
        return Err(PlacementError::TooShort);
    }

    let mut formed = Vec::with_capacity(words.len());
    for run in words {
        let text: String = run.letters.iter().map(|&l| l as char).collect();
        if !dictionary.contains(&text) {
            return Err(PlacementError::NotAWord(text));
        }
        formed.push(FormedWord {
            score: score_run(board, &run),
            text,
            start: run.start,
            direction: run.direction,
        });
    }

    let score = formed.iter().map(|w| w.score).sum();
    Ok(ScoredPlay {
        placement: placement.clone(),
        direction,
        words: formed,
        score,
    })
}

/// Rules (a)-(c): cells, line, contiguity. Returns the play direction.
fn check_geometry(board: &Board, placement: &Placement) -> Result<Direction, PlacementError> {
    let tiles = placement.tiles();
    if tiles.is_empty() {
        return Err(PlacementError::Empty);
    }

    for (i, &(pos, letter)) in tiles.iter().enumerate() {
        if !is_letter(letter) {
            return Err(PlacementError::NotALetter(letter as char));
        }
        let cell = board.get(pos).ok_or(PlacementError::OutOfBounds(pos))?;
        if tiles[..i].iter().any(|&(p, _)| p == pos) {
            return Err(PlacementError::DuplicateCell(pos));
        }
        if !cell.playable {
            return Err(PlacementError::NotPlayable(pos));
        }
        if cell.letter.is_some() {
            return Err(PlacementError::Occupied(pos));
        }
    }

    let first = tiles[0].0;
    let same_row = tiles.iter().all(|&(p, _)| p.row == first.row);
    let same_col = tiles.iter().all(|&(p, _)| p.col == first.col);
    let direction = match (same_row, same_col) {
        (false, false) => return Err(PlacementError::NotInLine),
        (true, false) => Direction::Across,
        (false, true) => Direction::Down,
        // Single tile: across if it extends a horizontal run, else down
        (true, true) => {
            if has_line_neighbor(board, first, Direction::Across) {
                Direction::Across
            } else {
                Direction::Down
            }
        }
    };

    let along = |p: Position| match direction {
        Direction::Across => p.col,
        Direction::Down => p.row,
    };
    let lo = tiles.iter().map(|&(p, _)| along(p)).min().unwrap_or(0);
    let hi = tiles.iter().map(|&(p, _)| along(p)).max().unwrap_or(0);
    for step in lo..=hi {
        let pos = match direction {
            Direction::Across => Position::new(first.row, step),
            Direction::Down => Position::new(step, first.col),
        };
        if !placement.covers(pos) && board.letter_at(pos).is_none() {
            return Err(PlacementError::Gap(pos));
        }
    }

    Ok(direction)
}

/// Rule (d): the first play covers the start cell, later plays touch a lock
fn check_connectivity(board: &Board, placement: &Placement) -> Result<(), PlacementError> {
    if !board.has_locked_letters() {
        return if placement.covers(board.center()) {
            Ok(())
        } else {
            Err(PlacementError::MissesStart)
        };
    }

    let touches = placement.tiles().iter().any(|&(pos, _)| {
        board
            .neighbors(pos)
            .any(|n| board.cell(n).locked && board.cell(n).letter.is_some())
    });
    if touches {
        Ok(())
    } else {
        Err(PlacementError::Disconnected)
    }
}

/// A maximal run of letters with the newly placed cells marked
struct Run {
    start: Position,
    direction: Direction,
    letters: Vec<u8>,
    fresh: Vec<bool>,
    cells: Vec<Position>,
}

fn letter_with(board: &Board, placement: &Placement, pos: Position) -> Option<u8> {
    placement
        .tiles()
        .iter()
        .find(|&&(p, _)| p == pos)
        .map(|&(_, l)| l)
        .or_else(|| board.letter_at(pos))
}

/// Scan back to the start of the filled run through `origin`, then forward
fn run_through(
    board: &Board,
    placement: &Placement,
    origin: Position,
    direction: Direction,
) -> Run {
    let mut start = origin;
    while let Some(prev) = start.offset(direction, -1) {
        if letter_with(board, placement, prev).is_none() {
            break;
        }
        start = prev;
    }

    let mut run = Run {
        start,
        direction,
        letters: Vec::new(),
        fresh: Vec::new(),
        cells: Vec::new(),
    };
    let mut cursor = Some(start);
    while let Some(pos) = cursor {
        let Some(letter) = letter_with(board, placement, pos) else {
            break;
        };
        run.letters.push(letter);
        run.fresh.push(placement.covers(pos));
        run.cells.push(pos);
        cursor = pos.offset(direction, 1);
    }
    run
}

/// Check if a letter already sits directly before or after `origin`
fn has_line_neighbor(board: &Board, origin: Position, direction: Direction) -> bool {
    [-1, 1]
        .into_iter()
        .filter_map(|step| origin.offset(direction, step))
        .any(|pos| board.letter_at(pos).is_some())
}

/// Main word first, then cross words of length two or more
fn extract_words(board: &Board, placement: &Placement, direction: Direction) -> Vec<Run> {
    let mut runs = Vec::new();
    let anchor = placement.tiles()[0].0;

    let main = run_through(board, placement, anchor, direction);
    if main.letters.len() >= 2 {
        runs.push(main);
    }

    for &(pos, _) in placement.tiles() {
        let cross = run_through(board, placement, pos, direction.perpendicular());
        if cross.letters.len() >= 2 {
            runs.push(cross);
        }
    }
    runs
}

/// Letter multipliers apply per fresh cell; word multipliers multiply together
fn score_run(board: &Board, run: &Run) -> u32 {
    let mut sum = 0;
    let mut word_multiplier = 1;
    for ((&letter, &fresh), &pos) in run.letters.iter().zip(&run.fresh).zip(&run.cells) {
        let mut value = letter_value(letter);
        if fresh {
            let bonus = board.cell(pos).bonus;
            value *= bonus.letter_multiplier();
            word_multiplier *= bonus.word_multiplier();
        }
        sum += value;
    }
    sum * word_multiplier
}

/// Commit a validated play, returning a new board with the tiles locked
#[must_use]
pub fn apply(board: &Board, play: &ScoredPlay) -> Board {
    let mut next = board.clone();
    for &(pos, letter) in play.placement.tiles() {
        let cell = next.cell_mut(pos);
        cell.letter = Some(letter);
        cell.locked = true;
    }
    next
}
