//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    game::{GameState, Outcome, ShareIntent},
    presentation::View,
    state::{app_state::GameSnapshot, SessionStats},
};

/// Response to a game event (start, click, retry)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameResponse {
    /// "applied" or "ignored"
    pub status: String,
    pub state: GameState,
    pub reaction_time_ms: Option<u64>,
    pub view: View,
    pub timestamp: DateTime<Utc>,
}

impl GameResponse {
    pub fn new(outcome: Outcome, snapshot: GameSnapshot) -> Self {
        Self {
            status: outcome.as_str().to_string(),
            state: snapshot.state,
            reaction_time_ms: snapshot.reaction_time_ms,
            view: snapshot.view,
            timestamp: Utc::now(),
        }
    }
}

/// Response to a share request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareResponse {
    pub status: String,
    pub state: GameState,
    pub share: Option<ShareIntent>,
    pub timestamp: DateTime<Utc>,
}

impl ShareResponse {
    pub fn new(share: Option<ShareIntent>, snapshot: GameSnapshot) -> Self {
        let outcome = if share.is_some() { Outcome::Applied } else { Outcome::Ignored };
        Self {
            status: outcome.as_str().to_string(),
            state: snapshot.state,
            share,
            timestamp: Utc::now(),
        }
    }
}

/// Status response with session information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub state: GameState,
    pub reaction_time_ms: Option<u64>,
    pub view: View,
    pub stats: SessionStats,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
