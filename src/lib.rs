//! Hash Collection Benchmark Library
//!
//! Times creation, size queries, lookups, iteration, deletion and insertion on
//! hash-based collections over many runs and reduces the timings to integer
//! statistics.

pub mod core;
pub mod error;
pub mod stats;
pub mod ui;
pub mod utils;

pub use crate::core::run_benchmark;
pub use error::{HarnessError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
