//! Monotonic time source used to stamp the go cue

use tokio::time::Instant;

/// Monotonic clock reporting milliseconds since an arbitrary origin.
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Clock backed by `tokio::time::Instant`, so paused runtimes control it too.
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
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}
