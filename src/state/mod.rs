//! State management module
//!
//! This module holds the shared game session served by the HTTP layer.

pub mod app_state;
pub mod stats;

// Re-export main types
pub use app_state::{AppState, Game};
pub use stats::SessionStats;
