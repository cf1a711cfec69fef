//! Command implementations

pub mod benchmark;
pub mod estimate;
pub mod generate;

pub use benchmark::{BenchmarkResult, benchmark_seeds, run_benchmark};
pub use estimate::{EstimateResult, run_estimate};
pub use generate::{GenerateResult, run_generate};
