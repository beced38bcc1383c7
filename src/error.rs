//! Error types for the benchmark harness

use thiserror::Error;

/// Errors surfaced by the harness
///
/// Failures of the collection under test or the clock are not represented
/// here: they propagate as panics and abort the run.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// Non-positive repeat count, population size, element count or lookup
    /// count, or an element domain that does not fit in `i64`.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Statistics were requested over zero samples.
    #[error("cannot compute statistics from an empty sample series")]
    EmptySeries,

    /// An integer accumulator would have wrapped.
    #[error("arithmetic overflow while accumulating {0}")]
    ArithmeticOverflow(&'static str),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV export error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, HarnessError>;
