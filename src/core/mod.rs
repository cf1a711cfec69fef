//! Core domain types for word-tile puzzles
//!
//! Boards, letters, words, placements, and the seeded random stream. Nothing
//! here knows about generation or search; validation and scoring are pure
//! functions of a board, a placement, and a dictionary.

mod board;
mod letters;
mod placement;
mod rng;
mod word;

pub use board::{Board, Bonus, Cell, Direction, Position, TemplateError};
pub use letters::{LetterCounts, VOWELS, is_letter, is_vowel, letter_value};
pub use placement::{FormedWord, Placement, PlacementError, ScoredPlay, apply, validate};
pub use rng::PuzzleRng;
pub use word::{Word, WordError};
