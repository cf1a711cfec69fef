//! The published puzzle artifact

use super::pool::LetterPool;
use super::shape::Archetype;
use crate::core::Board;
use crate::solver::PlayRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A named fraction of the estimate, e.g. "great" at 75%
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdSpec {
    pub label: String,
    pub fraction: f64,
}

impl ThresholdSpec {
    pub fn new(label: impl Into<String>, fraction: f64) -> Self {
        Self {
            label: label.into(),
            fraction,
        }
    }

    /// Default tiers: good, great, genius
    #[must_use]
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("good", 0.5),
            Self::new("great", 0.75),
            Self::new("genius", 0.9),
        ]
    }
}

/// A difficulty tier resolved to a score
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Threshold {
    pub label: String,
    pub score: u32,
}

/// Turn fractions of the estimate into score thresholds (rounded up)
///
/// # Examples
/// ```
/// use wordtile::generator::{derive_thresholds, ThresholdSpec};
///
/// let tiers = derive_thresholds(101, &ThresholdSpec::defaults());
/// assert_eq!(tiers[0].score, 51);
/// assert_eq!(tiers[2].score, 91);
/// ```
#[must_use]
pub fn derive_thresholds(estimate: u32, levels: &[ThresholdSpec]) -> Vec<Threshold> {
    levels
        .iter()
        .map(|level| Threshold {
            label: level.label.clone(),
            score: (f64::from(estimate) * level.fraction).ceil() as u32,
        })
        .collect()
}

/// How a puzzle was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Origin {
    /// Accepted on this outer attempt
    Generated { attempt: usize },
    /// Every attempt failed or the time budget ran out
    Fallback,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generated { attempt } => write!(f, "generated (attempt {attempt})"),
            Self::Fallback => f.write_str("fallback"),
        }
    }
}

/// An accepted puzzle
///
/// Built once per accepted attempt and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Puzzle {
    seed: String,
    board: Board,
    pool: LetterPool,
    archetype: Archetype,
    estimate: u32,
    thresholds: Vec<Threshold>,
    origin: Origin,
    best_line: Vec<PlayRecord>,
}

impl Puzzle {
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        seed: &str,
        board: Board,
        pool: LetterPool,
        archetype: Archetype,
        estimate: u32,
        thresholds: Vec<Threshold>,
        origin: Origin,
        best_line: Vec<PlayRecord>,
    ) -> Self {
        Self {
            seed: seed.to_string(),
            board,
            pool,
            archetype,
            estimate,
            thresholds,
            origin,
            best_line,
        }
    }

    #[must_use]
    pub fn seed(&self) -> &str {
        &self.seed
    }

    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub const fn pool(&self) -> &LetterPool {
        &self.pool
    }

    #[must_use]
    pub const fn archetype(&self) -> Archetype {
        self.archetype
    }

    /// Achievability estimate
    #[must_use]
    pub const fn estimate(&self) -> u32 {
        self.estimate
    }

    #[must_use]
    pub fn thresholds(&self) -> &[Threshold] {
        &self.thresholds
    }

    #[must_use]
    pub const fn origin(&self) -> Origin {
        self.origin
    }

    /// The solver's best line, for diagnostics
    #[must_use]
    pub fn best_line(&self) -> &[PlayRecord] {
        &self.best_line
    }

    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        matches!(self.origin, Origin::Fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_round_up() {
        let tiers = derive_thresholds(10, &ThresholdSpec::defaults());
        let scores: Vec<u32> = tiers.iter().map(|t| t.score).collect();
        assert_eq!(scores, [5, 8, 9]);
        assert_eq!(tiers[1].label, "great");
    }

    #[test]
    fn zero_estimate_gives_zero_thresholds() {
        let tiers = derive_thresholds(0, &ThresholdSpec::defaults());
        assert!(tiers.iter().all(|t| t.score == 0));
    }
}
