//! Seeded random stream
//!
//! Every generation step takes `&mut PuzzleRng` explicitly; nothing in the
//! crate reaches for a thread-local or global generator, so a seed phrase
//! fully determines a puzzle.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// Deterministic random stream derived from a seed phrase
#[derive(Debug, Clone)]
pub struct PuzzleRng {
    inner: StdRng,
}

impl PuzzleRng {
    /// Seed from a raw 64-bit value
    #[must_use]
    pub fn from_u64(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }

    /// Seed from a human-readable phrase such as `"2026-10-19"` or `"test-1"`
    ///
    /// # Examples
    /// ```
    /// use rand::Rng;
    /// use wordtile::core::PuzzleRng;
    ///
    /// let mut a = PuzzleRng::from_phrase("test-1");
    /// let mut b = PuzzleRng::from_phrase("test-1");
    /// assert_eq!(a.random::<u64>(), b.random::<u64>());
    /// ```
    #[must_use]
    pub fn from_phrase(phrase: &str) -> Self {
        Self::from_u64(phrase_to_seed(phrase))
    }

    /// Derive an independent stream for a sub-task (e.g. attempt `n`)
    ///
    /// Forking consumes one value from this stream, so the parent stays
    /// deterministic regardless of how much the child draws.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        Self::from_u64(self.inner.next_u64())
    }
}

impl RngCore for PuzzleRng {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        self.inner.fill_bytes(dst);
    }
}

/// FNV-1a over the phrase bytes; stable across platforms and releases
fn phrase_to_seed(phrase: &str) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0100_0000_01b3;

    phrase
        .bytes()
        .fold(OFFSET, |hash, byte| (hash ^ u64::from(byte)).wrapping_mul(PRIME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn same_phrase_same_stream() {
        let mut a = PuzzleRng::from_phrase("daily");
        let mut b = PuzzleRng::from_phrase("daily");
        let xs: Vec<u32> = (0..8).map(|_| a.random()).collect();
        let ys: Vec<u32> = (0..8).map(|_| b.random()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn different_phrases_diverge() {
        let mut a = PuzzleRng::from_phrase("test-1");
        let mut b = PuzzleRng::from_phrase("test-2");
        let xs: Vec<u64> = (0..4).map(|_| a.random()).collect();
        let ys: Vec<u64> = (0..4).map(|_| b.random()).collect();
        assert_ne!(xs, ys);
    }

    #[test]
    fn fork_is_deterministic() {
        let mut a = PuzzleRng::from_phrase("fork");
        let mut b = PuzzleRng::from_phrase("fork");
        let mut child_a = a.fork();
        let mut child_b = b.fork();
        assert_eq!(child_a.random::<u64>(), child_b.random::<u64>());
        assert_eq!(a.random::<u64>(), b.random::<u64>());
    }

    #[test]
    fn phrase_hash_is_fnv1a() {
        // Reference value for the empty input is the FNV offset basis
        assert_eq!(phrase_to_seed(""), 0xcbf2_9ce4_8422_2325);
        assert_ne!(phrase_to_seed("a"), phrase_to_seed("b"));
    }
}
