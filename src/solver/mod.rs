//! Achievability estimation
//!
//! A bounded beam search plays a fixed number of turns from the puzzle's
//! letter pool and reports the best cumulative score it finds. It is an
//! approximation: wider beams and larger fan-out find better lines at a
//! higher cost, but nothing here claims optimality.

mod beam;
mod moves;
mod state;

pub use beam::{BeamConfig, BeamSolver, Estimate, estimate};
pub use moves::candidate_moves;
pub use state::{PlacedTile, PlayRecord, SolverState};
