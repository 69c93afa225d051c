//! Game logic module
//!
//! The reaction-time state machine and the collaborators it talks to. Nothing
//! in here touches the network or the runtime directly, so the controller can
//! be driven synchronously from tests.

pub mod clock;
pub mod controller;
pub mod delay;
pub mod scheduler;
pub mod share;
pub mod state;

// Re-export main types
pub use clock::{Clock, MonotonicClock};
pub use controller::{GameController, Outcome};
pub use delay::DelayRange;
pub use scheduler::{DelayHandle, Scheduler};
pub use share::{ShareIntent, ShareTarget};
pub use state::GameState;
