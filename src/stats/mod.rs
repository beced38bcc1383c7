//! Sample collection and integer statistics

pub mod aggregate_stats;
pub mod sample_series;

pub use aggregate_stats::{isqrt, summarize, AggregateStats};
pub use sample_series::{Sample, SampleSeries};
