//! Background tasks module
//!
//! This module contains the timer machinery that runs alongside the HTTP server.

pub mod delay_timer;

// Re-export main items
pub use delay_timer::{delay_timer_task, TokioDelayScheduler};
