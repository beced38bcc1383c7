//! Integer summary statistics over a sample series
//!
//! Every reduction here stays in integer nanoseconds so that the same series
//! produces bit-identical output on every platform.

use crate::error::{HarnessError, Result};
use crate::stats::sample_series::{Sample, SampleSeries};

/// Summary of one [`SampleSeries`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregateStats {
    pub count: usize,
    pub sum: u128,
    pub average: Sample,
    pub minimum: Sample,
    pub maximum: Sample,
    /// Population standard deviation, truncated toward zero
    pub std_dev: Sample,
}

impl AggregateStats {
    /// Reduce a series to its summary statistics
    pub fn from_series(series: &SampleSeries) -> Result<Self> {
        let samples = series.samples();
        if samples.is_empty() {
            return Err(HarnessError::EmptySeries);
        }

        let count = samples.len();
        let sum = series.sum();
        // floor(sum / count) never exceeds the largest sample, so it fits a u64
        let average = (sum / count as u128) as Sample;

        let mut minimum = samples[0];
        let mut maximum = samples[0];
        for &s in &samples[1..] {
            if s < minimum {
                minimum = s;
            }
            if s > maximum {
                maximum = s;
            }
        }

        let mut squared_deviations: u128 = 0;
        for &s in samples {
            let deviation = s.abs_diff(average) as u128;
            squared_deviations = squared_deviations
                .checked_add(deviation * deviation)
                .ok_or(HarnessError::ArithmeticOverflow("squared deviations"))?;
        }
        let variance = squared_deviations / count as u128;
        // sqrt of a variance bounded by (max - min)^2 fits back into a u64
        let std_dev = isqrt(variance) as Sample;

        Ok(Self {
            count,
            sum,
            average,
            minimum,
            maximum,
            std_dev,
        })
    }
}

/// Shorthand for [`AggregateStats::from_series`]
pub fn summarize(series: &SampleSeries) -> Result<AggregateStats> {
    AggregateStats::from_series(series)
}

/// Integer square root by Newton's iteration
///
/// Seeded at `x = n`, iterates `y = (x + n/x) / 2` until `y >= x` and returns
/// `x`. The exact iteration matters: other integer sqrt schemes can disagree
/// by one near perfect squares.
pub fn isqrt(n: u128) -> u128 {
    if n == 0 {
        return 0;
    }
    let mut x = n;
    loop {
        let q = n / x;
        // floor((x + q) / 2) without overflowing when x is near u128::MAX
        let y = x / 2 + q / 2 + (x % 2 + q % 2) / 2;
        if y >= x {
            return x;
        }
        x = y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ten_twenty_thirty() {
        let stats = summarize(&SampleSeries::from(vec![10, 20, 30])).unwrap();
        assert_eq!(stats.average, 20);
        assert_eq!(stats.minimum, 10);
        assert_eq!(stats.maximum, 30);
        // floor(sqrt(200 / 3)) = floor(sqrt(66)) = 8
        assert_eq!(stats.std_dev, 8);
        assert_eq!(stats.count, 3);
        assert_eq!(stats.sum, 60);
    }

    #[test]
    fn empty_series_is_rejected() {
        assert!(matches!(
            summarize(&SampleSeries::new()),
            Err(HarnessError::EmptySeries)
        ));
    }

    #[test]
    fn constant_series_has_zero_spread() {
        for series in [vec![42], vec![7; 9], vec![0, 0, 0]] {
            let v = series[0];
            let stats = summarize(&SampleSeries::from(series)).unwrap();
            assert_eq!(stats.average, v);
            assert_eq!(stats.std_dev, 0);
            assert_eq!(stats.minimum, v);
            assert_eq!(stats.maximum, v);
        }
    }

    #[test]
    fn average_is_floor_division() {
        let stats = summarize(&SampleSeries::from(vec![1, 2])).unwrap();
        assert_eq!(stats.average, 1);
        // deviations from 1 are 0 and 1, variance floor(1/2) = 0
        assert_eq!(stats.std_dev, 0);
    }

    #[test]
    fn min_le_average_le_max() {
        let inputs: [&[u64]; 4] = [
            &[5, 1, 9, 3],
            &[0, u64::MAX],
            &[1_000_000, 3, 3, 3, 3],
            &[17],
        ];
        for input in inputs {
            let stats = summarize(&SampleSeries::from(input.to_vec())).unwrap();
            assert!(stats.minimum <= stats.average, "{input:?}");
            assert!(stats.average <= stats.maximum, "{input:?}");
        }
    }

    #[test]
    fn extreme_samples_do_not_overflow() {
        let stats = summarize(&SampleSeries::from(vec![0, u64::MAX])).unwrap();
        assert_eq!(stats.average, u64::MAX / 2);
        assert_eq!(stats.std_dev, u64::MAX / 2);
    }

    #[test]
    fn summarize_is_deterministic() {
        let series = SampleSeries::from(vec![120, 95, 300, 87, 101]);
        assert_eq!(summarize(&series).unwrap(), summarize(&series).unwrap());
    }

    #[test]
    fn isqrt_perfect_squares_and_neighbours() {
        for root in [1u128, 2, 3, 10, 255, 65_535, 1 << 40] {
            let square = root * root;
            assert_eq!(isqrt(square), root);
            assert_eq!(isqrt(square - 1), root - 1);
            assert_eq!(isqrt(square + 1), root);
        }
    }

    #[test]
    fn isqrt_small_values() {
        let expected = [0u128, 1, 1, 1, 2, 2, 2, 2, 2, 3];
        for (n, &want) in expected.iter().enumerate() {
            assert_eq!(isqrt(n as u128), want, "isqrt({n})");
        }
        assert_eq!(isqrt(66), 8);
    }

    #[test]
    fn isqrt_max_value() {
        assert_eq!(isqrt(u128::MAX), u64::MAX as u128);
    }
}
