//! Board shape carving
//!
//! Dead cells are only ever carved in the first half of the board (row-major
//! order) and mirrored to their 180° partner, so the playable mask stays
//! symmetric by construction. A final flood fill from the center removes
//! islands.

use super::outcome::{Outcome, Reason};
use super::weighted::weighted_index;
use crate::core::{Board, Position, PuzzleRng};
use log::trace;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Dead-space carving pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Archetype {
    /// Small symmetric corner cuts only
    Open,
    /// Cells beyond a jittered Manhattan radius die
    Diamond,
    /// Rectangular bites out of the edges
    Notched,
    /// Isolated dead cells
    Scattered,
}

impl Archetype {
    pub const ALL: [Self; 4] = [Self::Open, Self::Diamond, Self::Notched, Self::Scattered];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Diamond => "diamond",
            Self::Notched => "notched",
            Self::Scattered => "scattered",
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Selection weight per archetype
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchetypeWeights {
    pub open: f64,
    pub diamond: f64,
    pub notched: f64,
    pub scattered: f64,
}

impl Default for ArchetypeWeights {
    fn default() -> Self {
        Self {
            open: 3.0,
            diamond: 2.0,
            notched: 2.0,
            scattered: 1.0,
        }
    }
}

impl ArchetypeWeights {
    /// Weights in [`Archetype::ALL`] order
    #[must_use]
    pub const fn as_array(&self) -> [f64; 4] {
        [self.open, self.diamond, self.notched, self.scattered]
    }
}

/// Shape carving parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeConfig {
    pub archetype_weights: ArchetypeWeights,
    /// Cells within this Chebyshev distance of the center are never carved
    pub protection_radius: usize,
    /// Minimum playable share of the grid after carving and pruning
    pub min_playable_fraction: f64,
    /// Deepest corner cut used by the open archetype
    pub max_corner_cut: usize,
}

impl Default for ShapeConfig {
    fn default() -> Self {
        Self {
            archetype_weights: ArchetypeWeights::default(),
            protection_radius: 1,
            min_playable_fraction: 0.55,
            max_corner_cut: 2,
        }
    }
}

/// A carved board and the archetype that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    pub board: Board,
    pub archetype: Archetype,
}

/// Carve one shape; `Retry` if too little of the board survives
///
/// # Examples
/// ```
/// use wordtile::core::PuzzleRng;
/// use wordtile::generator::{generate_shape, ShapeConfig};
///
/// let mut rng = PuzzleRng::from_phrase("shape");
/// if let Some(shape) = generate_shape(9, &ShapeConfig::default(), &mut rng).success() {
///     assert!(shape.board.is_symmetric());
///     assert_eq!(shape.board.reachable_count(), shape.board.playable_count());
/// }
/// ```
pub fn generate_shape(size: usize, config: &ShapeConfig, rng: &mut PuzzleRng) -> Outcome<Shape> {
    let archetype = weighted_index(&config.archetype_weights.as_array(), rng)
        .map_or(Archetype::Open, |i| Archetype::ALL[i]);

    let mut carver = Carver::new(size, config.protection_radius);
    match archetype {
        Archetype::Open => carve_corners(&mut carver, config.max_corner_cut, rng),
        Archetype::Diamond => carve_diamond(&mut carver, rng),
        Archetype::Notched => carve_notches(&mut carver, rng),
        Archetype::Scattered => carve_scattered(&mut carver, rng),
    }
    let board = carver.finish();

    let playable = board.playable_count();
    let required = (config.min_playable_fraction * (size * size) as f64).ceil() as usize;
    trace!("{archetype} shape: {playable}/{} playable", size * size);
    if playable < required {
        return Outcome::Retry(Reason::RegionTooSmall { playable, required });
    }
    Outcome::Success(Shape { board, archetype })
}

/// Mirrored carving on a fresh board
struct Carver {
    board: Board,
    protection_radius: usize,
}

impl Carver {
    fn new(size: usize, protection_radius: usize) -> Self {
        Self {
            board: Board::new(size),
            protection_radius,
        }
    }

    fn size(&self) -> usize {
        self.board.size()
    }

    /// Row-major index strictly before the center
    fn in_first_half(&self, pos: Position) -> bool {
        let n = self.size();
        pos.row * n + pos.col < (n * n) / 2
    }

    /// Kill a cell and its partner; ignored outside the first half or
    /// inside the protected zone
    fn carve(&mut self, pos: Position) {
        if !self.board.in_bounds(pos)
            || !self.in_first_half(pos)
            || pos.chebyshev(self.board.center()) <= self.protection_radius
        {
            return;
        }
        let mirror = self.board.mirror(pos);
        self.board.cell_mut(pos).playable = false;
        self.board.cell_mut(mirror).playable = false;
    }

    fn first_half(&self) -> Vec<Position> {
        let n = self.size();
        (0..n * n / 2).map(|i| Position::new(i / n, i % n)).collect()
    }

    /// Prune cells cut off from the center, then hand back the board
    fn finish(mut self) -> Board {
        let reachable = self.board.flood_fill_from_center();
        let n = self.size();
        for idx in 0..n * n {
            let pos = Position::new(idx / n, idx % n);
            if !reachable[idx] && self.board.cell(pos).playable {
                let mirror = self.board.mirror(pos);
                self.board.cell_mut(pos).playable = false;
                self.board.cell_mut(mirror).playable = false;
            }
        }
        self.board
    }
}

/// Triangular cuts at the top-left and top-right corners (and by mirroring,
/// the bottom corners)
fn carve_corners(carver: &mut Carver, max_cut: usize, rng: &mut PuzzleRng) {
    let n = carver.size();
    for left in [true, false] {
        let depth = rng.random_range(0..=max_cut);
        for row in 0..depth {
            for offset in 0..depth - row {
                let col = if left { offset } else { n - 1 - offset };
                carver.carve(Position::new(row, col));
            }
        }
    }
}

fn carve_diamond(carver: &mut Carver, rng: &mut PuzzleRng) {
    let n = carver.size();
    let center = carver.board.center();
    let radius = n / 2 + rng.random_range(1..=n / 2);
    for pos in carver.first_half() {
        if pos.manhattan(center) > radius {
            carver.carve(pos);
        }
    }
}

/// Bites along the top edge and the upper left edge
fn carve_notches(carver: &mut Carver, rng: &mut PuzzleRng) {
    let n = carver.size();
    let max_depth = (n / 4).max(1);
    let notches = rng.random_range(1..=3);
    for _ in 0..notches {
        let along = rng.random_range(0..n);
        let depth = rng.random_range(1..=max_depth);
        let width = rng.random_range(1..=2);
        let top_edge = rng.random_bool(0.5);
        for d in 0..depth {
            for w in 0..width {
                let pos = if top_edge {
                    Position::new(d, along + w)
                } else {
                    Position::new(along / 2 + w, d)
                };
                carver.carve(pos);
            }
        }
    }
}

fn carve_scattered(carver: &mut Carver, rng: &mut PuzzleRng) {
    let n = carver.size();
    let candidates = carver.first_half();
    let count = rng.random_range(n / 2..=n);
    for _ in 0..count {
        let pos = candidates[rng.random_range(0..candidates.len())];
        carver.carve(pos);
    }
}
