//! Wordtile
//!
//! Daily word-tile puzzle generator with a beam-search achievability
//! estimate. A seed phrase deterministically produces a symmetric board with
//! bonus cells, a constrained letter pool, and difficulty thresholds derived
//! from the best score the solver can find.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use wordtile::config::GeneratorConfig;
//! use wordtile::dictionary::WordList;
//! use wordtile::generator::generate_puzzle;
//!
//! let dict = WordList::embedded();
//! let puzzle = generate_puzzle("2026-10-19", &GeneratorConfig::default(), &dict);
//! println!("{}", puzzle.board());
//! println!("Letters: {}  Estimate: {}", puzzle.pool(), puzzle.estimate());
//! ```

// Core domain types
pub mod core;

// Word lookup capability
pub mod dictionary;

// Tuning knobs
pub mod config;

// Board, bonus, and pool generation
pub mod generator;

// Beam-search estimator
pub mod solver;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

// Interactive TUI interface
pub mod interactive;
