//! Reaction Nano - A reaction-time mini-game
//!
//! The game itself is a small state machine ([`game::GameController`]) that
//! emits display commands to a [`presentation::Presentation`]. The rest of the
//! crate hosts one game session over HTTP, with the cue delay running on the
//! tokio runtime.

pub mod api;
pub mod config;
pub mod game;
pub mod presentation;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use game::{GameController, GameState};
pub use state::AppState;
pub use utils::signals::shutdown_signal;
