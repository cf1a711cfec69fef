//! Letters, tile values, and letter multisets
//!
//! Letters are lowercase ASCII bytes (`b'a'..=b'z'`) everywhere inside the
//! crate and are only uppercased for display.

use std::fmt;

/// Standard English tile values, indexed by `letter - b'a'`
const LETTER_VALUES: [u32; 26] = [
    1, 3, 3, 2, 1, 4, 2, 4, 1, 8, 5, 1, 3, 1, 1, 3, 10, 1, 1, 1, 1, 4, 4, 8, 4, 10,
];

/// The five vowels; `y` counts as a consonant for pool constraints
pub const VOWELS: [u8; 5] = [b'a', b'e', b'i', b'o', b'u'];

/// Check if a byte is a lowercase ASCII letter
#[inline]
#[must_use]
pub const fn is_letter(letter: u8) -> bool {
    letter.is_ascii_lowercase()
}

/// Check if a letter is a vowel
#[inline]
#[must_use]
pub const fn is_vowel(letter: u8) -> bool {
    matches!(letter, b'a' | b'e' | b'i' | b'o' | b'u')
}

/// Base point value of a letter (0 for non-letters)
///
/// # Examples
/// ```
/// use wordtile::core::letter_value;
///
/// assert_eq!(letter_value(b'e'), 1);
/// assert_eq!(letter_value(b'q'), 10);
/// ```
#[inline]
#[must_use]
pub const fn letter_value(letter: u8) -> u32 {
    if is_letter(letter) {
        LETTER_VALUES[(letter - b'a') as usize]
    } else {
        0
    }
}

/// A multiset of letters stored as 26 counters
///
/// Used for racks, pools, and dictionary words. Containment is the hot path of
/// move generation, so it is a straight 26-slot comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LetterCounts([u8; 26]);

impl LetterCounts {
    /// Empty multiset
    #[must_use]
    pub const fn new() -> Self {
        Self([0; 26])
    }

    /// Build from any sequence of letters; non-letters are ignored
    #[must_use]
    pub fn from_letters(letters: impl IntoIterator<Item = u8>) -> Self {
        let mut counts = Self::new();
        for letter in letters {
            counts.add(letter);
        }
        counts
    }

    /// Count of one letter
    #[inline]
    #[must_use]
    pub const fn get(&self, letter: u8) -> u8 {
        if is_letter(letter) {
            self.0[(letter - b'a') as usize]
        } else {
            0
        }
    }

    /// Add one copy of a letter
    #[inline]
    pub fn add(&mut self, letter: u8) {
        if is_letter(letter) {
            self.0[(letter - b'a') as usize] += 1;
        }
    }

    /// Remove one copy of a letter, returning false if none was present
    #[inline]
    pub fn remove(&mut self, letter: u8) -> bool {
        if !is_letter(letter) {
            return false;
        }
        let slot = &mut self.0[(letter - b'a') as usize];
        if *slot == 0 {
            return false;
        }
        *slot -= 1;
        true
    }

    /// Check that every letter of `other` is available here
    #[inline]
    #[must_use]
    pub fn contains(&self, other: &Self) -> bool {
        self.0.iter().zip(other.0.iter()).all(|(have, need)| have >= need)
    }

    /// Multiset difference; `None` if `other` is not contained
    #[must_use]
    pub fn checked_sub(&self, other: &Self) -> Option<Self> {
        if !self.contains(other) {
            return None;
        }
        let mut out = *self;
        for (slot, need) in out.0.iter_mut().zip(other.0.iter()) {
            *slot -= need;
        }
        Some(out)
    }

    /// Total number of letters
    #[must_use]
    pub fn total(&self) -> usize {
        self.0.iter().map(|&c| usize::from(c)).sum()
    }

    /// Number of distinct letters
    #[must_use]
    pub fn distinct(&self) -> usize {
        self.0.iter().filter(|&&c| c > 0).count()
    }

    /// Number of vowels
    #[must_use]
    pub fn vowels(&self) -> usize {
        VOWELS.iter().map(|&v| usize::from(self.get(v))).sum()
    }

    /// Highest count held by any single letter
    #[must_use]
    pub fn max_duplicates(&self) -> u8 {
        self.0.iter().copied().max().unwrap_or(0)
    }

    /// Check if nothing is left
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&c| c == 0)
    }

    /// Iterate letters in alphabetical order, repeating duplicates
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.0
            .iter()
            .enumerate()
            .flat_map(|(i, &count)| std::iter::repeat_n(b'a' + i as u8, usize::from(count)))
    }
}

impl fmt::Display for LetterCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for letter in self.iter() {
            write!(f, "{}", letter.to_ascii_uppercase() as char)?;
        }
        Ok(())
    }
}
