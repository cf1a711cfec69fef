//! Terminal output formatting
//!
//! Display utilities for CLI results and pretty-printing.

pub mod display;
pub mod formatters;

pub use display::{
    print_benchmark_result, print_estimate_result, print_generate_result, print_play_line,
    print_puzzle,
};
