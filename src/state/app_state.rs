//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::{
    mpsc::{self, UnboundedReceiver},
    watch,
};
use tracing::{info, warn};

use super::SessionStats;
use crate::{
    game::{
        DelayHandle, DelayRange, GameController, GameState, MonotonicClock, Outcome, ShareIntent,
        ShareTarget,
    },
    presentation::{View, ViewPresenter},
    tasks::TokioDelayScheduler,
};

/// The controller as wired up by the server
pub type Game = GameController<TokioDelayScheduler, ViewPresenter, MonotonicClock>;

/// Snapshot of the game taken right after an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub state: GameState,
    pub reaction_time_ms: Option<u64>,
    pub view: View,
}

impl GameSnapshot {
    fn of(game: &Game) -> Self {
        Self {
            state: game.state(),
            reaction_time_ms: game.reaction_time_ms(),
            view: game.presenter().view().clone(),
        }
    }
}

/// Shared state: the one game session plus server metadata
#[derive(Debug)]
pub struct AppState {
    /// The game session. Every event holds the lock for one transition.
    pub game: Arc<Mutex<Game>>,
    pub stats: Arc<Mutex<SessionStats>>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Channel publishing the view after every display change
    pub view_tx: watch::Sender<View>,
    /// Keep the receiver alive to prevent channel closure
    pub _view_rx: watch::Receiver<View>,
}

impl AppState {
    /// Create the session. The returned receiver yields fired cue delays and
    /// must be handed to `delay_timer_task`.
    pub fn new(
        port: u16,
        host: String,
        delays: DelayRange,
        share: ShareTarget,
    ) -> (Self, UnboundedReceiver<DelayHandle>) {
        let (fired_tx, fired_rx) = mpsc::unbounded_channel();
        let game = GameController::new(
            TokioDelayScheduler::new(fired_tx),
            ViewPresenter::new(),
            MonotonicClock::new(),
            delays,
            share,
        );
        let (view_tx, view_rx) = watch::channel(game.presenter().view().clone());

        let state = Self {
            game: Arc::new(Mutex::new(game)),
            stats: Arc::new(Mutex::new(SessionStats::new())),
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            view_tx,
            _view_rx: view_rx,
        };
        (state, fired_rx)
    }

    /// Run one event against the game and publish the resulting view
    fn apply<T, F>(&self, action: Option<&str>, event: F) -> Result<(T, GameSnapshot), String>
    where
        F: FnOnce(&mut Game) -> T,
    {
        let mut game = self.game.lock()
            .map_err(|e| format!("Failed to lock game: {}", e))?;

        let previous_revision = game.presenter().view().revision;
        let result = event(&mut *game);
        let snapshot = GameSnapshot::of(&game);
        drop(game); // Release the lock early

        if let Some(action) = action {
            if let Ok(mut last_action) = self.last_action.lock() {
                *last_action = Some(action.to_string());
            }
            if let Ok(mut last_time) = self.last_action_time.lock() {
                *last_time = Some(Utc::now());
            }
        }

        if snapshot.view.revision != previous_revision {
            if let Err(e) = self.view_tx.send(snapshot.view.clone()) {
                warn!("Failed to publish view update: {}", e);
            }
        }

        Ok((result, snapshot))
    }

    fn update_stats<F>(&self, updater: F)
    where
        F: FnOnce(&mut SessionStats),
    {
        match self.stats.lock() {
            Ok(mut stats) => updater(&mut stats),
            Err(e) => warn!("Failed to lock session stats: {}", e),
        }
    }

    /// Handle a start request
    pub fn start(&self) -> Result<(Outcome, GameSnapshot), String> {
        let (outcome, snapshot) = self.apply(Some("start"), |game| game.start_requested())?;
        if outcome.is_applied() {
            self.update_stats(SessionStats::record_attempt);
        }
        Ok((outcome, snapshot))
    }

    /// Handle a click on the play surface
    pub fn click(&self) -> Result<(Outcome, GameSnapshot), String> {
        let (outcome, snapshot) = self.apply(Some("click"), |game| game.surface_activated())?;
        if outcome.is_applied() {
            match (snapshot.state, snapshot.reaction_time_ms) {
                (GameState::Result, Some(ms)) => self.update_stats(|stats| stats.record_result(ms)),
                (GameState::Idle, _) => self.update_stats(SessionStats::record_early_click),
                _ => {}
            }
        }
        Ok((outcome, snapshot))
    }

    /// Handle a retry request
    pub fn retry(&self) -> Result<(Outcome, GameSnapshot), String> {
        self.apply(Some("retry"), |game| game.retry_requested())
    }

    /// Handle a share request
    pub fn share(&self) -> Result<(Option<ShareIntent>, GameSnapshot), String> {
        self.apply(Some("share"), |game| game.share_requested())
    }

    /// Deliver a fired cue delay (internal use only)
    pub fn delay_elapsed(&self, handle: DelayHandle) -> Result<Outcome, String> {
        let (outcome, snapshot) = self.apply(None, |game| game.delay_elapsed(handle))?;
        if outcome.is_applied() {
            info!("Surface ready, state={}", snapshot.state);
        }
        Ok(outcome)
    }

    /// Get a snapshot of the game without changing it
    pub fn get_snapshot(&self) -> Result<GameSnapshot, String> {
        self.game.lock()
            .map(|game| GameSnapshot::of(&game))
            .map_err(|e| format!("Failed to lock game: {}", e))
    }

    /// Get the session counters
    pub fn get_stats(&self) -> Result<SessionStats, String> {
        self.stats.lock()
            .map(|stats| stats.clone())
            .map_err(|e| format!("Failed to lock session stats: {}", e))
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let secs = self.start_time.elapsed().as_secs();
        let (hours, minutes, seconds) = (secs / 3600, (secs % 3600) / 60, secs % 60);

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        game::share::{DEFAULT_PRODUCT_NAME, DEFAULT_SHARE_ENDPOINT},
        presentation::Background,
    };

    fn app_state() -> (AppState, UnboundedReceiver<DelayHandle>) {
        AppState::new(
            20554,
            "127.0.0.1".to_string(),
            DelayRange::default(),
            ShareTarget::new(
                DEFAULT_PRODUCT_NAME.to_string(),
                "http://127.0.0.1:20554/".to_string(),
                DEFAULT_SHARE_ENDPOINT.to_string(),
            ),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn round_updates_view_channel_and_stats() {
        let (state, mut fired_rx) = app_state();
        let mut view_rx = state.view_tx.subscribe();

        let (outcome, snapshot) = state.start().unwrap();
        assert_eq!(outcome, Outcome::Applied);
        assert_eq!(snapshot.state, GameState::Waiting);
        assert!(view_rx.has_changed().unwrap());
        assert_eq!(view_rx.borrow_and_update().background, Background::Armed);

        let handle = fired_rx.recv().await.unwrap();
        assert_eq!(state.delay_elapsed(handle).unwrap(), Outcome::Applied);
        assert_eq!(view_rx.borrow_and_update().background, Background::Go);

        tokio::time::advance(std::time::Duration::from_millis(180)).await;
        let (_, snapshot) = state.click().unwrap();
        assert_eq!(snapshot.state, GameState::Result);
        assert_eq!(snapshot.reaction_time_ms, Some(180));

        let stats = state.get_stats().unwrap();
        assert_eq!(stats.attempts, 1);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.best_ms, Some(180));
        assert_eq!(state.get_last_action().0.as_deref(), Some("click"));
    }

    #[tokio::test]
    async fn ignored_event_publishes_nothing() {
        let (state, _fired_rx) = app_state();
        let mut view_rx = state.view_tx.subscribe();
        view_rx.borrow_and_update();

        let (outcome, snapshot) = state.click().unwrap();

        assert_eq!(outcome, Outcome::Ignored);
        assert_eq!(snapshot.state, GameState::Idle);
        assert!(!view_rx.has_changed().unwrap());
        assert_eq!(state.get_stats().unwrap(), SessionStats::new());
    }

    #[tokio::test]
    async fn early_click_is_counted() {
        let (state, _fired_rx) = app_state();
        state.start().unwrap();

        let (outcome, snapshot) = state.click().unwrap();

        assert_eq!(outcome, Outcome::Applied);
        assert_eq!(snapshot.state, GameState::Idle);
        assert_eq!(state.get_stats().unwrap().early_clicks, 1);
    }
}
