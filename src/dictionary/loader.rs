//! Word list loading utilities
//!
//! Provides the in-memory [`WordList`] dictionary, built from a file, the
//! embedded list, or any iterator of strings.

use super::{Dictionary, WORDS};
use crate::core::Word;
use rustc_hash::FxHashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error loading a dictionary
#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("failed to read dictionary {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("dictionary {0} contains no playable words")]
    Empty(PathBuf),
}

/// In-memory dictionary sorted by word length
///
/// Words that fail [`Word::new`] are skipped rather than rejected, matching
/// how loose community word lists are usually shipped.
#[derive(Debug, Clone, Default)]
pub struct WordList {
    words: Vec<Word>,
    lookup: FxHashSet<String>,
}

impl WordList {
    /// Build from any sequence of strings, skipping invalid entries
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list: Vec<Word> = words
            .into_iter()
            .filter_map(|s| Word::new(s.as_ref().trim()).ok())
            .collect();
        list.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.text().cmp(b.text())));
        list.dedup();

        let lookup = list.iter().map(|w| w.text().to_string()).collect();
        Self {
            words: list,
            lookup,
        }
    }

    /// The dictionary compiled into the binary
    ///
    /// # Examples
    /// ```
    /// use wordtile::dictionary::{Dictionary, WordList};
    ///
    /// let dict = WordList::embedded();
    /// assert!(dict.contains("tile"));
    /// assert!(!dict.contains("qzx"));
    /// ```
    #[must_use]
    pub fn embedded() -> Self {
        Self::from_words(WORDS)
    }

    /// Load words from a file, one per line
    ///
    /// Blank lines and lines starting with `#` are ignored.
    ///
    /// # Errors
    ///
    /// Returns `DictionaryError::Io` if the file cannot be read and
    /// `DictionaryError::Empty` if it holds no valid words.
    ///
    /// # Examples
    /// ```no_run
    /// use wordtile::dictionary::WordList;
    ///
    /// let dict = WordList::load_from_file("data/words.txt").unwrap();
    /// println!("Loaded {} words", dict.len());
    /// ```
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, DictionaryError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| DictionaryError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let list = Self::from_words(
            content
                .lines()
                .filter(|line| !line.trim_start().starts_with('#')),
        );
        if list.is_empty() {
            return Err(DictionaryError::Empty(path.to_path_buf()));
        }
        Ok(list)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// All words, shortest first
    #[must_use]
    pub fn words(&self) -> &[Word] {
        &self.words
    }
}

impl Dictionary for WordList {
    fn contains(&self, word: &str) -> bool {
        self.lookup.contains(word)
    }

    fn words_up_to(&self, max_len: usize) -> impl Iterator<Item = &Word> {
        let end = self.words.partition_point(|w| w.len() <= max_len);
        self.words[..end].iter()
    }
}
