//! Randomized cue delay

use std::time::Duration;

/// Default lower bound of the cue delay in milliseconds
pub const DEFAULT_MIN_DELAY_MS: u64 = 2000;

/// Default (exclusive) upper bound of the cue delay in milliseconds
pub const DEFAULT_MAX_DELAY_MS: u64 = 5000;

/// Half-open range `[min, max)` the cue delay is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayRange {
    min_ms: u64,
    max_ms: u64,
}

impl DelayRange {
    /// Create a range, rejecting empty ones
    pub fn new(min_ms: u64, max_ms: u64) -> Result<Self, String> {
        if min_ms >= max_ms {
            return Err(format!(
                "Invalid delay range: min ({}ms) must be below max ({}ms)",
                min_ms, max_ms
            ));
        }
        Ok(Self { min_ms, max_ms })
    }

    pub fn min_ms(&self) -> u64 {
        self.min_ms
    }

    pub fn max_ms(&self) -> u64 {
        self.max_ms
    }

    /// Draw a delay uniformly from the range at millisecond granularity
    pub fn sample(&self) -> Duration {
        let span = self.max_ms - self.min_ms;
        let offset = ((span as f64) * rand::random::<f64>()) as u64;
        Duration::from_millis(self.min_ms + offset.min(span - 1))
    }
}

impl Default for DelayRange {
    fn default() -> Self {
        Self {
            min_ms: DEFAULT_MIN_DELAY_MS,
            max_ms: DEFAULT_MAX_DELAY_MS,
        }
    }
}
