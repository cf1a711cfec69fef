//! Generator configuration
//!
//! One serde tree holds every tuning knob. Missing fields take their
//! defaults, so a JSON file only needs the values it changes:
//!
//! ```json
//! { "board_size": 11, "beam": { "width": 80 } }
//! ```

use crate::core::Bonus;
use crate::generator::{AcceptanceBand, BonusConfig, PoolConfig, ShapeConfig, ThresholdSpec};
use crate::solver::BeamConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Smallest and largest supported board sizes
pub const BOARD_SIZES: std::ops::RangeInclusive<usize> = 5..=15;

/// Error loading or validating a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("board size must be odd and within 5-15, got {0}")]
    BoardSize(usize),
    #[error("vowel bounds {min}-{max} do not fit a pool of {size}")]
    VowelBounds { min: usize, max: usize, size: usize },
    #[error("letter weights must be finite, non-negative, and not all zero")]
    LetterWeights,
    #[error("duplicate cap must be at least 1")]
    DuplicateCap,
    #[error("beam turns, width, and fan-out must all be at least 1")]
    Beam,
    #[error("acceptance band min {min} exceeds max {max}")]
    Band { min: u32, max: u32 },
    #[error("threshold {label:?} fraction {fraction} is outside (0, 1]")]
    Threshold { label: String, fraction: f64 },
    #[error("{0:?} is not a placeable bonus tier")]
    BonusTier(Bonus),
    #[error("{name} must be within [0, 1], got {value}")]
    Fraction { name: &'static str, value: f64 },
    #[error("{0} must be at least 1")]
    Zero(&'static str),
}

/// Everything the generator needs besides the seed and dictionary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Odd board side length
    pub board_size: usize,
    pub shape: ShapeConfig,
    pub bonus: BonusConfig,
    pub pool: PoolConfig,
    pub beam: BeamConfig,
    pub acceptance: AcceptanceBand,
    pub thresholds: Vec<ThresholdSpec>,
    /// Outer attempts before the fallback puzzle
    pub max_attempts: usize,
    /// Shape-and-bonus retries inside one attempt
    pub layout_retries: usize,
    /// Wall-clock budget checked between attempts
    pub time_budget_ms: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            board_size: 9,
            shape: ShapeConfig::default(),
            bonus: BonusConfig::default(),
            pool: PoolConfig::default(),
            beam: BeamConfig::default(),
            acceptance: AcceptanceBand::default(),
            thresholds: ThresholdSpec::defaults(),
            max_attempts: 10,
            layout_retries: 20,
            time_budget_ms: None,
        }
    }
}

impl GeneratorConfig {
    /// Load from a JSON file and validate
    ///
    /// # Errors
    /// Returns `ConfigError` if the file cannot be read or parsed, or if the
    /// values fail [`GeneratorConfig::validate`].
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints
    ///
    /// # Errors
    /// Returns the first `ConfigError` found.
    ///
    /// # Examples
    /// ```
    /// use wordtile::config::GeneratorConfig;
    ///
    /// assert!(GeneratorConfig::default().validate().is_ok());
    ///
    /// let even = GeneratorConfig { board_size: 8, ..GeneratorConfig::default() };
    /// assert!(even.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !BOARD_SIZES.contains(&self.board_size) || self.board_size % 2 == 0 {
            return Err(ConfigError::BoardSize(self.board_size));
        }
        if self.max_attempts == 0 {
            return Err(ConfigError::Zero("max_attempts"));
        }
        if self.layout_retries == 0 {
            return Err(ConfigError::Zero("layout_retries"));
        }

        check_fraction("min_playable_fraction", self.shape.min_playable_fraction)?;

        for policy in &self.bonus.tiers {
            if !Bonus::TIERS.contains(&policy.tier) {
                return Err(ConfigError::BonusTier(policy.tier));
            }
            check_fraction("edge_preference", policy.edge_preference)?;
        }
        if self.bonus.top_k == 0 {
            return Err(ConfigError::Zero("bonus.top_k"));
        }

        let pool = &self.pool;
        if pool.size < 2 || pool.min_vowels > pool.max_vowels || pool.min_vowels > pool.size {
            return Err(ConfigError::VowelBounds {
                min: pool.min_vowels,
                max: pool.max_vowels,
                size: pool.size,
            });
        }
        if pool.weights.iter().any(|w| !w.is_finite() || *w < 0.0)
            || pool.weights.iter().all(|&w| w == 0.0)
        {
            return Err(ConfigError::LetterWeights);
        }
        if pool.max_duplicates == 0 {
            return Err(ConfigError::DuplicateCap);
        }
        if pool.max_attempts == 0 {
            return Err(ConfigError::Zero("pool.max_attempts"));
        }

        if self.beam.turns == 0 || self.beam.width == 0 || self.beam.fan_out == 0 {
            return Err(ConfigError::Beam);
        }
        if self.acceptance.min > self.acceptance.max {
            return Err(ConfigError::Band {
                min: self.acceptance.min,
                max: self.acceptance.max,
            });
        }
        for level in &self.thresholds {
            if !(level.fraction > 0.0 && level.fraction <= 1.0) {
                return Err(ConfigError::Threshold {
                    label: level.label.clone(),
                    fraction: level.fraction,
                });
            }
        }
        Ok(())
    }
}

fn check_fraction(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Fraction { name, value })
    }
}
