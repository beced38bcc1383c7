//! Sample series for one benchmarked operation
//!
//! A series is built up append-only while a run executes and is then
//! reduced to [`AggregateStats`](crate::stats::aggregate_stats::AggregateStats).

use crate::error::{HarnessError, Result};

/// One elapsed-duration measurement in nanoseconds
pub type Sample = u64;

/// Ordered samples for one named operation, in measurement order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SampleSeries {
    samples: Vec<Sample>,
}

impl SampleSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty series with room for `capacity` samples
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Exact sum of all samples
    pub fn sum(&self) -> u128 {
        // u64 samples cannot overflow a u128 sum for any series that fits in memory
        self.samples.iter().map(|&s| s as u128).sum()
    }

    /// Sum narrowed back to a single [`Sample`]
    ///
    /// Used when a whole run is folded into one aggregate sample.
    pub fn total(&self) -> Result<Sample> {
        Sample::try_from(self.sum()).map_err(|_| HarnessError::ArithmeticOverflow("run total"))
    }
}

impl From<Vec<Sample>> for SampleSeries {
    fn from(samples: Vec<Sample>) -> Self {
        Self { samples }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_preserves_measurement_order() {
        let mut series = SampleSeries::new();
        series.push(30);
        series.push(10);
        series.push(20);
        assert_eq!(series.samples(), &[30, 10, 20]);
        assert_eq!(series.len(), 3);
    }

    #[test]
    fn sum_does_not_wrap_on_large_samples() {
        let series = SampleSeries::from(vec![u64::MAX, u64::MAX]);
        assert_eq!(series.sum(), 2 * u64::MAX as u128);
        assert!(matches!(
            series.total(),
            Err(HarnessError::ArithmeticOverflow(_))
        ));
    }

    #[test]
    fn total_of_empty_series_is_zero() {
        assert_eq!(SampleSeries::new().total().unwrap(), 0);
    }
}
