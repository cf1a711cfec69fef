//! Constrained letter pool sampling
//!
//! A pool is drawn in three passes (vowels, consonants, fill) from a weighted
//! letter table, then checked as a whole. Draw attempts that break a
//! constraint are retried; when every attempt fails, one of the vetted
//! fallback sets is used instead, so pool generation never errors.

use super::outcome::{Outcome, Reason, retry};
use super::weighted::weighted_index;
use crate::core::{LetterCounts, PuzzleRng, is_vowel};
use crate::dictionary::Dictionary;
use log::{debug, warn};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Standard English tile distribution, used as draw weights
const DEFAULT_WEIGHTS: [f64; 26] = [
    9.0, 2.0, 2.0, 4.0, 12.0, 2.0, 3.0, 2.0, 9.0, 1.0, 1.0, 4.0, 2.0, 6.0, 8.0, 2.0, 1.0, 6.0, 4.0,
    6.0, 4.0, 2.0, 2.0, 1.0, 2.0, 1.0,
];

/// Hand-vetted pools: five vowels, one doubled letter at most, and several
/// six- and seven-letter words each
pub(crate) const FALLBACK_SETS: [&str; 3] =
    ["aeeiorstnldcpm", "aeiousthrnbgly", "aeeoiklnwgdrst"];

/// Short words are this long
const SHORT_WORD_LENS: std::ops::RangeInclusive<usize> = 3..=4;

/// A letter that needs another to be useful (`q` needs `u`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanionRule {
    pub letter: char,
    pub requires: char,
}

/// Pool parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Number of letters in the pool
    pub size: usize,
    /// Draw weight per letter, `a` to `z`
    pub weights: [f64; 26],
    pub min_vowels: usize,
    pub max_vowels: usize,
    pub max_duplicates: u8,
    /// Uniqueness floor
    pub min_distinct: usize,
    pub companions: Vec<CompanionRule>,
    /// Minimum number of 3-4 letter dictionary words the pool must spell
    pub min_short_words: usize,
    /// At least one dictionary word this long must be spellable
    pub long_word_len: usize,
    pub max_attempts: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            size: 14,
            weights: DEFAULT_WEIGHTS,
            min_vowels: 4,
            max_vowels: 6,
            max_duplicates: 2,
            min_distinct: 10,
            companions: vec![CompanionRule {
                letter: 'q',
                requires: 'u',
            }],
            min_short_words: 40,
            long_word_len: 6,
            max_attempts: 200,
        }
    }
}

/// Where a pool came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PoolSource {
    Drawn { attempts: usize },
    Fallback,
}

/// An ordered letter multiset handed to the player
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LetterPool {
    letters: String,
    #[serde(skip)]
    counts: LetterCounts,
    pub source: PoolSource,
}

impl LetterPool {
    pub(crate) fn new(letters: Vec<u8>, source: PoolSource) -> Self {
        let counts = LetterCounts::from_letters(letters.iter().copied());
        Self {
            letters: letters.into_iter().map(char::from).collect(),
            counts,
            source,
        }
    }

    /// Letters in presentation order
    #[must_use]
    pub fn letters(&self) -> &str {
        &self.letters
    }

    #[must_use]
    pub const fn counts(&self) -> &LetterCounts {
        &self.counts
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }
}

impl fmt::Display for LetterPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.letters.to_uppercase())
    }
}

/// A pool constraint that a drawn candidate broke
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PoolViolation {
    #[error("drew {got} letters, wanted {want}")]
    Size { got: usize, want: usize },
    #[error("{0} vowels outside bounds")]
    Vowels(usize),
    #[error("a letter appears {0} times")]
    Duplicates(u8),
    #[error("only {0} distinct letters")]
    TooUniform(usize),
    #[error("{letter} without {requires}")]
    MissingCompanion { letter: char, requires: char },
    #[error("only {0} short words formable")]
    FewShortWords(usize),
    #[error("no word of {0}+ letters formable")]
    NoLongWord(usize),
}

/// Draw a pool that passes every constraint, or fall back to a vetted set
///
/// # Examples
/// ```
/// use wordtile::core::PuzzleRng;
/// use wordtile::dictionary::WordList;
/// use wordtile::generator::{generate_pool, PoolConfig};
///
/// let dict = WordList::embedded();
/// let config = PoolConfig::default();
/// let pool = generate_pool(&config, &dict, &mut PuzzleRng::from_phrase("pool"));
/// assert_eq!(pool.len(), config.size);
/// ```
pub fn generate_pool<D: Dictionary>(
    config: &PoolConfig,
    dictionary: &D,
    rng: &mut PuzzleRng,
) -> LetterPool {
    let outcome = retry("letter pool", config.max_attempts, |attempt| {
        let letters = draw_letters(config, rng);
        let counts = LetterCounts::from_letters(letters.iter().copied());
        match check_pool(&counts, config, dictionary) {
            Ok(()) => {
                let source = PoolSource::Drawn { attempts: attempt };
                Outcome::Success(LetterPool::new(letters, source))
            }
            Err(violation) => Outcome::Retry(Reason::PoolConstraint(violation.to_string())),
        }
    });

    match outcome {
        Outcome::Success(pool) => pool,
        Outcome::Retry(reason) | Outcome::Fail(reason) => {
            debug!("using fallback letter set: {reason}");
            fallback_pool(config, rng.random_range(0..FALLBACK_SETS.len()))
        }
    }
}

/// Vowels, then consonants, then fill; shuffled into presentation order
fn draw_letters(config: &PoolConfig, rng: &mut PuzzleRng) -> Vec<u8> {
    let mut counts = LetterCounts::new();
    let mut letters = Vec::with_capacity(config.size);

    let vowel_target = if config.min_vowels <= config.max_vowels {
        rng.random_range(config.min_vowels..=config.max_vowels).min(config.size)
    } else {
        config.min_vowels.min(config.size)
    };
    draw_into(&mut letters, &mut counts, vowel_target, config, rng, is_vowel);

    let consonant_target = config.size - letters.len();
    draw_into(&mut letters, &mut counts, consonant_target, config, rng, |l| !is_vowel(l));

    // Only reached when the duplicate cap starved a class
    let remaining = config.size - letters.len();
    draw_into(&mut letters, &mut counts, remaining, config, rng, |_| true);

    letters.shuffle(rng);
    letters
}

/// Draw up to `n` letters accepted by `filter`, honouring the duplicate cap
fn draw_into(
    letters: &mut Vec<u8>,
    counts: &mut LetterCounts,
    n: usize,
    config: &PoolConfig,
    rng: &mut PuzzleRng,
    filter: impl Fn(u8) -> bool,
) {
    for _ in 0..n {
        let weights: Vec<f64> = (b'a'..=b'z')
            .zip(config.weights)
            .map(|(letter, weight)| {
                if filter(letter) && counts.get(letter) < config.max_duplicates {
                    weight
                } else {
                    0.0
                }
            })
            .collect();
        let Some(idx) = weighted_index(&weights, rng) else {
            return;
        };
        let letter = b'a' + idx as u8;
        counts.add(letter);
        letters.push(letter);
    }
}

/// Check every pool constraint at once
///
/// # Errors
/// Returns the first `PoolViolation` found.
pub fn check_pool<D: Dictionary>(
    counts: &LetterCounts,
    config: &PoolConfig,
    dictionary: &D,
) -> Result<(), PoolViolation> {
    check_letters(counts, config)?;
    if counts.distinct() < config.min_distinct {
        return Err(PoolViolation::TooUniform(counts.distinct()));
    }

    let short = dictionary
        .words_up_to(*SHORT_WORD_LENS.end())
        .filter(|w| SHORT_WORD_LENS.contains(&w.len()) && w.fits_in(counts))
        .count();
    if short < config.min_short_words {
        return Err(PoolViolation::FewShortWords(short));
    }
    let has_long = dictionary
        .words_up_to(config.size)
        .any(|w| w.len() >= config.long_word_len && w.fits_in(counts));
    if !has_long {
        return Err(PoolViolation::NoLongWord(config.long_word_len));
    }
    Ok(())
}

/// Size, vowel bounds, duplicate cap, and companion rules
fn check_letters(counts: &LetterCounts, config: &PoolConfig) -> Result<(), PoolViolation> {
    let total = counts.total();
    if total != config.size {
        return Err(PoolViolation::Size {
            got: total,
            want: config.size,
        });
    }
    let vowels = counts.vowels();
    if vowels < config.min_vowels || vowels > config.max_vowels {
        return Err(PoolViolation::Vowels(vowels));
    }
    if counts.max_duplicates() > config.max_duplicates {
        return Err(PoolViolation::Duplicates(counts.max_duplicates()));
    }
    for rule in &config.companions {
        let (letter, requires) = (rule.letter as u8, rule.requires as u8);
        if counts.get(letter) > 0 && counts.get(requires) == 0 {
            return Err(PoolViolation::MissingCompanion {
                letter: rule.letter,
                requires: rule.requires,
            });
        }
    }
    Ok(())
}

/// The first vetted set, starting at `first`, that fits the configured size
///
/// The dictionary gates are not re-applied: the sets are vetted at their
/// native size. If no set fits, the first one is used as fitted.
pub(crate) fn fallback_pool(config: &PoolConfig, first: usize) -> LetterPool {
    let mut closest = None;
    for i in 0..FALLBACK_SETS.len() {
        let letters = fit_set(FALLBACK_SETS[(first + i) % FALLBACK_SETS.len()], config);
        let counts = LetterCounts::from_letters(letters.iter().copied());
        match check_letters(&counts, config) {
            Ok(()) => return LetterPool::new(letters, PoolSource::Fallback),
            Err(violation) => {
                debug!("vetted set rejected at size {}: {violation}", config.size);
                closest.get_or_insert(letters);
            }
        }
    }

    warn!("no vetted letter set fits size {}, using the closest", config.size);
    LetterPool::new(closest.unwrap_or_default(), PoolSource::Fallback)
}

/// Trim or top up a vetted set to `config.size` with the vowel count clamped
/// into bounds
///
/// Vowels come first, then consonants, each from the set in order and then
/// from the heaviest letters of the weight table.
fn fit_set(set: &str, config: &PoolConfig) -> Vec<u8> {
    let set_vowels = set.bytes().filter(|&l| is_vowel(l)).count();
    let vowel_target = set_vowels
        .clamp(config.min_vowels.min(config.max_vowels), config.max_vowels)
        .min(config.size);

    let mut counts = LetterCounts::new();
    let mut letters = Vec::with_capacity(config.size);
    let vowels = set.bytes().filter(|&l| is_vowel(l));
    let source = vowels.chain(by_weight(config, is_vowel));
    take_capped(&mut letters, &mut counts, source, vowel_target, config);

    let consonants = set.bytes().filter(|&l| !is_vowel(l));
    let rest = config.size - letters.len();
    let source = consonants.chain(by_weight(config, |l| !is_vowel(l)));
    take_capped(&mut letters, &mut counts, source, rest, config);
    letters
}

/// Letters of one class, heaviest first, each repeated up to the cap
fn by_weight(config: &PoolConfig, filter: impl Fn(u8) -> bool) -> impl Iterator<Item = u8> {
    let mut ranked: Vec<u8> = (b'a'..=b'z').filter(|&l| filter(l)).collect();
    let weight = |letter: u8| config.weights[usize::from(letter - b'a')];
    ranked.sort_by(|&a, &b| weight(b).total_cmp(&weight(a)));
    let cap = usize::from(config.max_duplicates);
    ranked.into_iter().flat_map(move |l| std::iter::repeat_n(l, cap))
}

/// Take up to `n` letters from `source`, skipping any at the duplicate cap
fn take_capped(
    letters: &mut Vec<u8>,
    counts: &mut LetterCounts,
    source: impl Iterator<Item = u8>,
    n: usize,
    config: &PoolConfig,
) {
    let mut taken = 0;
    for letter in source {
        if taken == n {
            break;
        }
        if counts.get(letter) < config.max_duplicates {
            counts.add(letter);
            letters.push(letter);
            taken += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::WordList;

    #[test]
    fn drawn_pools_satisfy_every_constraint() {
        let dict = WordList::embedded();
        let config = PoolConfig::default();
        for seed in 0..10 {
            let pool = generate_pool(&config, &dict, &mut PuzzleRng::from_u64(seed));
            let counts = pool.counts();
            assert_eq!(pool.len(), 14);
            assert!((4..=6).contains(&counts.vowels()), "seed {seed}: {pool}");
            assert!(counts.max_duplicates() <= 2, "seed {seed}: {pool}");
            if counts.get(b'q') > 0 {
                assert!(counts.get(b'u') > 0);
            }
        }
    }

    #[test]
    fn vetted_sets_pass_their_own_checks() {
        let dict = WordList::embedded();
        let config = PoolConfig::default();
        for set in FALLBACK_SETS {
            let counts = LetterCounts::from_letters(set.bytes());
            assert_eq!(check_pool(&counts, &config, &dict), Ok(()), "{set}");
        }
    }

    #[test]
    fn impossible_constraints_fall_back() {
        let dict = WordList::embedded();
        let config = PoolConfig {
            min_short_words: 100_000,
            max_attempts: 5,
            ..PoolConfig::default()
        };
        let pool = generate_pool(&config, &dict, &mut PuzzleRng::from_phrase("fallback"));
        assert_eq!(pool.source, PoolSource::Fallback);
        assert_eq!(pool.len(), 14);
        assert!(FALLBACK_SETS.contains(&pool.letters()));
    }

    #[test]
    fn fallback_is_trimmed_and_topped_up() {
        let small = PoolConfig {
            size: 8,
            ..PoolConfig::default()
        };
        let pool = fallback_pool(&small, 0);
        assert_eq!(pool.len(), 8);
        assert_eq!(check_letters(pool.counts(), &small), Ok(()));

        let large = PoolConfig {
            size: 18,
            ..PoolConfig::default()
        };
        let pool = fallback_pool(&large, 1);
        assert_eq!(pool.len(), 18);
        assert_eq!(check_letters(pool.counts(), &large), Ok(()));
    }

    #[test]
    fn trimmed_fallback_keeps_vowels_in_bounds() {
        let config = PoolConfig {
            size: 6,
            min_vowels: 2,
            max_vowels: 3,
            ..PoolConfig::default()
        };
        for first in 0..FALLBACK_SETS.len() {
            let pool = fallback_pool(&config, first);
            assert_eq!(pool.len(), 6);
            assert_eq!(check_letters(pool.counts(), &config), Ok(()), "{pool}");
        }
        assert_eq!(fallback_pool(&config, 0).letters(), "aeerst");
    }

    #[test]
    fn top_up_reaches_size_when_weights_run_dry() {
        let mut weights = [0.0; 26];
        weights[usize::from(b'e' - b'a')] = 1.0;
        let config = PoolConfig {
            size: 20,
            weights,
            ..PoolConfig::default()
        };
        let pool = fallback_pool(&config, 0);
        assert_eq!(pool.len(), 20);
        assert_eq!(check_letters(pool.counts(), &config), Ok(()));
    }

    #[test]
    fn fallback_skips_sets_that_break_a_rule() {
        // The first set has an m and no u
        let config = PoolConfig {
            companions: vec![CompanionRule {
                letter: 'm',
                requires: 'u',
            }],
            ..PoolConfig::default()
        };
        let pool = fallback_pool(&config, 0);
        assert_eq!(pool.letters(), FALLBACK_SETS[1]);
        assert_eq!(pool.source, PoolSource::Fallback);
    }

    #[test]
    fn companion_rule_is_enforced() {
        let dict = WordList::embedded();
        let config = PoolConfig {
            min_short_words: 0,
            long_word_len: 2,
            min_distinct: 0,
            ..PoolConfig::default()
        };
        let without_u = LetterCounts::from_letters("qaeiostrnlpdcm".bytes());
        assert_eq!(
            check_pool(&without_u, &config, &dict),
            Err(PoolViolation::MissingCompanion {
                letter: 'q',
                requires: 'u'
            })
        );
    }

    #[test]
    fn playability_gates_use_the_dictionary() {
        let dict = WordList::from_words(["cat", "act", "planet"]);
        let config = PoolConfig {
            size: 6,
            min_vowels: 1,
            max_vowels: 3,
            min_distinct: 1,
            min_short_words: 2,
            ..PoolConfig::default()
        };
        let planet = LetterCounts::from_letters("planet".bytes());
        assert_eq!(check_pool(&planet, &config, &dict), Err(PoolViolation::FewShortWords(0)));

        let catact = LetterCounts::from_letters("cattab".bytes());
        assert_eq!(check_pool(&catact, &config, &dict), Err(PoolViolation::NoLongWord(6)));
    }

    #[test]
    fn vowel_bounds_and_duplicates_are_checked() {
        let dict = WordList::embedded();
        let config = PoolConfig::default();
        let few_vowels = LetterCounts::from_letters("abcdfghklmnprs".bytes());
        assert_eq!(check_pool(&few_vowels, &config, &dict), Err(PoolViolation::Vowels(1)));

        let triple = LetterCounts::from_letters("aaaeiostrnlpdc".bytes());
        assert_eq!(check_pool(&triple, &config, &dict), Err(PoolViolation::Duplicates(3)));
    }

    #[test]
    fn same_seed_same_pool() {
        let dict = WordList::embedded();
        let config = PoolConfig::default();
        let a = generate_pool(&config, &dict, &mut PuzzleRng::from_phrase("daily"));
        let b = generate_pool(&config, &dict, &mut PuzzleRng::from_phrase("daily"));
        assert_eq!(a, b);
    }
}
