//! Interactive puzzle inspector
//!
//! Browse generated puzzles seed by seed and replay the solver's line.

mod app;
mod rendering;

pub use app::{App, Message, MessageStyle, run_tui};
