//! HTTP endpoint handlers

use std::{convert::Infallible, sync::Arc};
use axum::{
    extract::State,
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        Html, Json,
    },
};
use futures::stream::{Stream, StreamExt};
use tokio_stream::wrappers::WatchStream;
use tracing::{debug, error, info, warn};

use crate::{
    game::Outcome,
    state::{app_state::GameSnapshot, AppState},
};
use super::responses::{GameResponse, HealthResponse, ShareResponse, StatusResponse};

const INDEX_HTML: &str = include_str!("../../static/index.html");

fn game_response(
    event: &str,
    result: Result<(Outcome, GameSnapshot), String>,
) -> Result<Json<GameResponse>, StatusCode> {
    match result {
        Ok((outcome, snapshot)) => {
            if outcome.is_applied() {
                info!("{} endpoint called - state is now {}", event, snapshot.state);
            } else {
                debug!("{} endpoint called - ignored in state {}", event, snapshot.state);
            }
            Ok(Json(GameResponse::new(outcome, snapshot)))
        }
        Err(e) => {
            error!("Failed to handle {} event: {}", event, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET / - Serve the game page
pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Handle POST /start - Arm the surface and schedule the go cue
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<GameResponse>, StatusCode> {
    game_response("Start", state.start())
}

/// Handle POST /click - Click on the play surface
pub async fn click_handler(State(state): State<Arc<AppState>>) -> Result<Json<GameResponse>, StatusCode> {
    game_response("Click", state.click())
}

/// Handle POST /retry - Back to the instruction screen
pub async fn retry_handler(State(state): State<Arc<AppState>>) -> Result<Json<GameResponse>, StatusCode> {
    game_response("Retry", state.retry())
}

/// Handle POST /share - Build the share intent for the current result
pub async fn share_handler(State(state): State<Arc<AppState>>) -> Result<Json<ShareResponse>, StatusCode> {
    match state.share() {
        Ok((share, snapshot)) => {
            match &share {
                Some(intent) => info!("Share endpoint called - intent {}", intent.intent_url),
                None => debug!("Share endpoint called - ignored in state {}", snapshot.state),
            }
            Ok(Json(ShareResponse::new(share, snapshot)))
        }
        Err(e) => {
            error!("Failed to handle share event: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /status - Return the current game and session status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let snapshot = match state.get_snapshot() {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to get game snapshot: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let stats = match state.get_stats() {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to get session stats: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        state: snapshot.state,
        reaction_time_ms: snapshot.reaction_time_ms,
        view: snapshot.view,
        stats,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /events - Stream view updates as Server-Sent Events
pub async fn events_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    debug!("View stream subscribed");
    let stream = WatchStream::new(state.view_tx.subscribe()).filter_map(|view| async move {
        match Event::default().event("view").json_data(&view) {
            Ok(event) => Some(Ok(event)),
            Err(e) => {
                warn!("Failed to encode view update: {}", e);
                None
            }
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
