//! Monotonic clock used for every timed operation

use std::time::Instant;

/// Source of monotonic nanosecond timestamps
///
/// Consecutive calls within one run must never go backwards. Wall-clock time
/// is never used for measurement.
pub trait Clock {
    fn now(&self) -> u64;
}

/// [`Clock`] backed by [`Instant`], counting nanoseconds since creation
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> u64 {
        // u64 nanoseconds cover ~584 years of process uptime
        self.origin.elapsed().as_nanos() as u64
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> u64 {
        (**self).now()
    }
}
