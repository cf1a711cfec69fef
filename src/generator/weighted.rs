//! Weighted random choice
//!
//! One draw function serves every randomized decision in generation:
//! archetype selection, letter draws, and ranked bonus-cell sampling.

use crate::core::PuzzleRng;
use rand::Rng;
use rand::distr::weighted::WeightedIndex;

/// Draw an index with probability proportional to its weight
///
/// Returns `None` when there is nothing to draw from (empty slice, all
/// weights zero, or any weight negative or non-finite).
///
/// # Examples
/// ```
/// use wordtile::core::PuzzleRng;
/// use wordtile::generator::weighted_index;
///
/// let mut rng = PuzzleRng::from_phrase("doc");
/// assert_eq!(weighted_index(&[0.0, 5.0, 0.0], &mut rng), Some(1));
/// assert_eq!(weighted_index(&[0.0, 0.0], &mut rng), None);
/// ```
pub fn weighted_index(weights: &[f64], rng: &mut PuzzleRng) -> Option<usize> {
    if weights.iter().any(|w| !w.is_finite()) {
        return None;
    }
    let dist = WeightedIndex::new(weights).ok()?;
    Some(rng.sample(&dist))
}

/// Pick from a list already sorted best-first
///
/// Only the first `top_k` entries are eligible; entry `i` gets weight
/// `decay^i`, so the leader is favoured without being forced. A `decay` of
/// zero (or `top_k` of one) always returns the leader.
pub fn pick_ranked(len: usize, top_k: usize, decay: f64, rng: &mut PuzzleRng) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let k = top_k.clamp(1, len);
    if k == 1 || decay <= 0.0 {
        return Some(0);
    }
    let weights: Vec<f64> = (0..k).map(|i| decay.powi(i as i32)).collect();
    weighted_index(&weights, rng)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_weights_are_never_drawn() {
        let mut rng = PuzzleRng::from_phrase("weights");
        for _ in 0..200 {
            let idx = weighted_index(&[0.0, 1.0, 0.0, 2.0], &mut rng).unwrap();
            assert!(idx == 1 || idx == 3);
        }
    }

    #[test]
    fn invalid_weights_yield_none() {
        let mut rng = PuzzleRng::from_phrase("weights");
        assert_eq!(weighted_index(&[], &mut rng), None);
        assert_eq!(weighted_index(&[0.0, 0.0], &mut rng), None);
        assert_eq!(weighted_index(&[1.0, -1.0], &mut rng), None);
        assert_eq!(weighted_index(&[f64::NAN], &mut rng), None);
    }

    #[test]
    fn ranked_pick_stays_in_top_k() {
        let mut rng = PuzzleRng::from_phrase("ranked");
        for _ in 0..200 {
            let idx = pick_ranked(10, 3, 0.5, &mut rng).unwrap();
            assert!(idx < 3);
        }
    }

    #[test]
    fn ranked_pick_favours_the_leader() {
        let mut rng = PuzzleRng::from_phrase("ranked-bias");
        let mut hits = [0usize; 4];
        for _ in 0..2000 {
            hits[pick_ranked(4, 4, 0.5, &mut rng).unwrap()] += 1;
        }
        assert!(hits[0] > hits[1]);
        assert!(hits[1] > hits[2]);
        assert!(hits[2] > hits[3]);
        // Not forced: lower ranks still get picked
        assert!(hits[3] > 0);
    }

    #[test]
    fn ranked_pick_degenerate_cases() {
        let mut rng = PuzzleRng::from_phrase("ranked-edge");
        assert_eq!(pick_ranked(0, 5, 0.5, &mut rng), None);
        assert_eq!(pick_ranked(5, 1, 0.5, &mut rng), Some(0));
        assert_eq!(pick_ranked(5, 5, 0.0, &mut rng), Some(0));
        assert_eq!(pick_ranked(1, 5, 0.9, &mut rng), Some(0));
    }
}
