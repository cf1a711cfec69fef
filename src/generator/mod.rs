//! Puzzle generation
//!
//! Shape carving, bonus placement, letter pool sampling, and the outer
//! attempt loop with its accept/reject gate. Every function takes the random
//! stream explicitly.

mod bonus;
mod fallback;
mod outcome;
mod pipeline;
mod pool;
mod puzzle;
mod shape;
mod weighted;

pub use bonus::{BonusConfig, BonusLayout, TierCount, TierPolicy, place_bonuses};
pub use fallback::{fallback_board, fallback_puzzle};
pub use outcome::{Outcome, Reason, retry};
pub use pipeline::{AcceptanceBand, generate_puzzle, run_attempt};
pub use pool::{
    CompanionRule, LetterPool, PoolConfig, PoolSource, PoolViolation, check_pool, generate_pool,
};
pub use puzzle::{Origin, Puzzle, Threshold, ThresholdSpec, derive_thresholds};
pub use shape::{Archetype, ArchetypeWeights, Shape, ShapeConfig, generate_shape};
pub use weighted::{pick_ranked, weighted_index};
