//! Dictionary word representation
//!
//! A Word stores a lowercase word together with its letter multiset, so the
//! solver can test "constructible from these tiles" without rescanning text.

use super::letters::LetterCounts;
use std::fmt;
use thiserror::Error;

/// Shortest word the game accepts
pub const MIN_WORD_LEN: usize = 2;

/// Longest word the game accepts
pub const MAX_WORD_LEN: usize = 15;

/// A playable word with precomputed letter counts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    text: String,
    counts: LetterCounts,
}

/// Error type for invalid words
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WordError {
    #[error("Word must be 2-15 letters, got {0}")]
    InvalidLength(usize),
    #[error("Word must contain only ASCII letters")]
    NonAscii,
    #[error("Word contains invalid characters")]
    InvalidCharacters,
}

impl Word {
    /// Create a new Word from a string
    ///
    /// # Errors
    /// Returns `WordError` if:
    /// - Length is outside `MIN_WORD_LEN..=MAX_WORD_LEN`
    /// - Contains non-ASCII characters
    /// - Contains non-alphabetic characters
    ///
    /// # Examples
    /// ```
    /// use wordtile::core::Word;
    ///
    /// let word = Word::new("Tiles").unwrap();
    /// assert_eq!(word.text(), "tiles");
    ///
    /// assert!(Word::new("a").is_err());
    /// assert!(Word::new("ti1es").is_err());
    /// ```
    pub fn new(text: impl Into<String>) -> Result<Self, WordError> {
        let text: String = text.into().to_lowercase();

        if !(MIN_WORD_LEN..=MAX_WORD_LEN).contains(&text.len()) {
            return Err(WordError::InvalidLength(text.len()));
        }

        if !text.is_ascii() {
            return Err(WordError::NonAscii);
        }

        if !text.chars().all(|c| c.is_ascii_lowercase()) {
            return Err(WordError::InvalidCharacters);
        }

        let counts = LetterCounts::from_letters(text.bytes());

        Ok(Self { text, counts })
    }

    /// Get the word as a string slice
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the word as lowercase ASCII bytes
    #[inline]
    #[must_use]
    pub fn letters(&self) -> &[u8] {
        self.text.as_bytes()
    }

    /// Number of letters
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Always false for a validated word; provided for API symmetry with `len`
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Letter multiset of the word
    #[inline]
    #[must_use]
    pub const fn counts(&self) -> &LetterCounts {
        &self.counts
    }

    /// Check whether the word can be spelled entirely from `rack`
    #[inline]
    #[must_use]
    pub fn fits_in(&self, rack: &LetterCounts) -> bool {
        rack.contains(&self.counts)
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}
