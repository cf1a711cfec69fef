//! Dictionary capability
//!
//! The solver and the letter-pool gates see the dictionary only through the
//! [`Dictionary`] trait: exact membership and bounded enumeration. Loading and
//! storage live here and nowhere else.

mod embedded;
pub mod loader;

pub use embedded::{WORDS, WORDS_COUNT};
pub use loader::{DictionaryError, WordList};

use crate::core::Word;

/// Word lookup capability consumed by validation and search
pub trait Dictionary {
    /// Exact, lowercase membership test
    fn contains(&self, word: &str) -> bool;

    /// Every word with at most `max_len` letters, shortest first
    fn words_up_to(&self, max_len: usize) -> impl Iterator<Item = &Word>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn words_count_matches_const() {
        assert_eq!(WORDS.len(), WORDS_COUNT);
    }

    #[test]
    fn embedded_words_are_lowercase_ascii() {
        for &word in WORDS {
            assert!(
                word.len() >= 2 && word.chars().all(|c| c.is_ascii_lowercase()),
                "Word '{word}' is not a lowercase word"
            );
        }
    }

    #[test]
    fn embedded_words_are_sorted_and_unique() {
        assert!(WORDS.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn embedded_list_is_large_enough_to_play() {
        assert!(WORDS_COUNT > 3000, "Expected a few thousand words");
        let embedded = WordList::embedded();
        assert!(embedded.contains("planet"));
        assert!(embedded.contains("at"));
    }
}
