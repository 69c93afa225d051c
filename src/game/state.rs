//! Game state enumeration

use serde::{Deserialize, Serialize};

/// Reaction game state machine states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameState {
    /// Instructions shown, waiting for the player to start
    #[default]
    Idle,
    /// Random delay running, the surface is armed but not clickable yet
    Waiting,
    /// Go cue shown, the next click is measured
    Ready,
    /// Reaction time displayed, retry or share available
    Result,
}

impl GameState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Waiting => "waiting",
            Self::Ready => "ready",
            Self::Result => "result",
        }
    }

    /// Whether a surface click means something in this state.
    pub fn accepts_clicks(&self) -> bool {
        matches!(self, Self::Waiting | Self::Ready)
    }
}

impl std::fmt::Display for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_lowercase() {
        assert_eq!(serde_json::to_string(&GameState::Waiting).unwrap(), "\"waiting\"");
        assert_eq!(
            serde_json::from_str::<GameState>("\"result\"").unwrap(),
            GameState::Result
        );
    }

    #[test]
    fn only_waiting_and_ready_accept_clicks() {
        assert!(!GameState::Idle.accepts_clicks());
        assert!(GameState::Waiting.accepts_clicks());
        assert!(GameState::Ready.accepts_clicks());
        assert!(!GameState::Result.accepts_clicks());
    }
}
