//! Per-session counters reported by the status endpoint

use serde::{Deserialize, Serialize};

/// Counters of what happened since the server started
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    /// Rounds started
    pub attempts: u64,
    /// Rounds aborted by clicking before the go cue
    pub early_clicks: u64,
    /// Rounds that produced a reaction time
    pub completed: u64,
    pub best_ms: Option<u64>,
    pub last_ms: Option<u64>,
}

impl SessionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_attempt(&mut self) {
        self.attempts += 1;
    }

    pub fn record_early_click(&mut self) {
        self.early_clicks += 1;
    }

    pub fn record_result(&mut self, reaction_time_ms: u64) {
        self.completed += 1;
        self.last_ms = Some(reaction_time_ms);
        self.best_ms = Some(match self.best_ms {
            Some(best) => best.min(reaction_time_ms),
            None => reaction_time_ms,
        });
    }
}
