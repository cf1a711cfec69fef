//! Bonus tier placement
//!
//! Tiers are placed highest value first. Each pick scores every eligible cell
//! by how well its distance from the edge matches the tier's preference, then
//! samples among the best few with geometrically decaying weights.

use super::weighted::pick_ranked;
use crate::core::{Board, Bonus, Position, PuzzleRng};
use serde::{Deserialize, Serialize};

/// Placement rules for one bonus tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierPolicy {
    pub tier: Bonus,
    /// Target number of cells
    pub count: usize,
    /// 1.0 pulls the tier to the rim, 0.0 towards the middle
    pub edge_preference: f64,
    /// Minimum Manhattan distance from the center
    pub min_center_distance: usize,
    /// Allow this tier orthogonally next to an already tagged cell
    #[serde(default)]
    pub allow_adjacent: bool,
}

impl TierPolicy {
    #[must_use]
    pub const fn new(
        tier: Bonus,
        count: usize,
        edge_preference: f64,
        min_center_distance: usize,
    ) -> Self {
        Self {
            tier,
            count,
            edge_preference,
            min_center_distance,
            allow_adjacent: false,
        }
    }
}

/// Bonus engine parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BonusConfig {
    pub tiers: Vec<TierPolicy>,
    /// How many of the best-scored cells are eligible for each pick
    pub top_k: usize,
    /// Weight ratio between consecutive ranks
    pub decay: f64,
}

impl Default for BonusConfig {
    fn default() -> Self {
        Self {
            tiers: vec![
                TierPolicy::new(Bonus::TripleWord, 2, 0.9, 4),
                TierPolicy::new(Bonus::DoubleWord, 4, 0.4, 2),
                TierPolicy::new(Bonus::TripleLetter, 4, 0.6, 2),
                TierPolicy::new(Bonus::DoubleLetter, 8, 0.5, 1),
            ],
            top_k: 4,
            decay: 0.6,
        }
    }
}

impl BonusConfig {
    /// Policies in placement priority order
    #[must_use]
    pub fn ordered_tiers(&self) -> Vec<&TierPolicy> {
        let mut tiers: Vec<&TierPolicy> = self.tiers.iter().collect();
        tiers.sort_by_key(|p| Bonus::TIERS.iter().position(|&t| t == p.tier).unwrap_or(usize::MAX));
        tiers
    }
}

/// How many cells of one tier were placed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TierCount {
    pub tier: Bonus,
    pub placed: usize,
    pub target: usize,
}

/// Board with bonuses applied plus the per-tier tally
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BonusLayout {
    pub board: Board,
    pub counts: Vec<TierCount>,
}

impl BonusLayout {
    /// First tier that missed its target
    #[must_use]
    pub fn shortfall(&self) -> Option<TierCount> {
        self.counts.iter().copied().find(|c| c.placed < c.target)
    }
}

/// Tag bonus cells on a carved board
///
/// Never fails: a tier with too few eligible cells is reported through
/// [`BonusLayout::shortfall`] and left to the caller.
pub fn place_bonuses(board: &Board, config: &BonusConfig, rng: &mut PuzzleRng) -> BonusLayout {
    let mut board = board.clone();
    let mut counts = Vec::with_capacity(config.tiers.len());

    for policy in config.ordered_tiers() {
        let mut placed = 0;
        while placed < policy.count {
            let ranked = ranked_cells(&board, policy);
            let Some(pick) = pick_ranked(ranked.len(), config.top_k, config.decay, rng) else {
                break;
            };
            board.cell_mut(ranked[pick]).bonus = policy.tier;
            placed += 1;
        }
        counts.push(TierCount {
            tier: policy.tier,
            placed,
            target: policy.count,
        });
    }

    BonusLayout { board, counts }
}

/// Eligible cells sorted best-first; ties keep row-major order
fn ranked_cells(board: &Board, policy: &TierPolicy) -> Vec<Position> {
    let mut scored: Vec<(Position, f64)> = board
        .cells()
        .filter(|cell| is_eligible(board, cell.position(), policy))
        .map(|cell| (cell.position(), edge_score(board, cell.position(), policy.edge_preference)))
        .collect();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.into_iter().map(|(pos, _)| pos).collect()
}

fn is_eligible(board: &Board, pos: Position, policy: &TierPolicy) -> bool {
    let cell = board.cell(pos);
    if !cell.playable || cell.bonus != Bonus::None {
        return false;
    }
    if pos.manhattan(board.center()) < policy.min_center_distance {
        return false;
    }
    policy.allow_adjacent || board.neighbors(pos).all(|n| board.cell(n).bonus == Bonus::None)
}

/// Blend of "near the edge" and "near the middle", weighted by preference
fn edge_score(board: &Board, pos: Position, edge_preference: f64) -> f64 {
    let n = board.size();
    let to_edge = pos.row.min(pos.col).min(n - 1 - pos.row).min(n - 1 - pos.col);
    let depth = to_edge as f64 / (n / 2).max(1) as f64;
    edge_preference * (1.0 - depth) + (1.0 - edge_preference) * depth
}
