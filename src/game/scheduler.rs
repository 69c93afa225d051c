//! Scheduling seam for the single delayed go cue

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Identifies one scheduled delay. Handles are never reused, so a late
/// callback carrying an old handle can be told apart from the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DelayHandle(pub u64);

impl std::fmt::Display for DelayHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "delay#{}", self.0)
    }
}

/// Arms and cancels deferred callbacks on behalf of the controller.
///
/// When a scheduled delay elapses the implementation must deliver the handle
/// back through `GameController::delay_elapsed`; it must not call into the
/// controller while the controller is handling another event.
pub trait Scheduler {
    fn schedule(&mut self, handle: DelayHandle, delay: Duration);
    fn cancel(&mut self, handle: DelayHandle);
}
