//! Reaction game controller
//!
//! Owns the game state, the outstanding cue delay and the go-cue timestamp.
//! Every public event method performs at most one transition and reports
//! whether the event was applied. Events that make no sense in the current
//! state are ignored without touching anything.

use tracing::{debug, info, warn};

use super::{
    clock::Clock,
    delay::DelayRange,
    scheduler::{DelayHandle, Scheduler},
    share::{ShareIntent, ShareTarget},
    state::GameState,
};
use crate::presentation::{DisplayCommand, Presentation};

/// Whether an event changed anything
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Ignored,
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Applied => "applied",
            Self::Ignored => "ignored",
        }
    }
}

/// The reaction-time state machine
#[derive(Debug)]
pub struct GameController<S, P, C> {
    state: GameState,
    /// Outstanding cue delay, present only while `Waiting`
    pending_delay: Option<DelayHandle>,
    next_handle: u64,
    /// Clock reading when the go cue was shown
    started_at_ms: Option<f64>,
    reaction_time_ms: Option<u64>,
    delays: DelayRange,
    share: ShareTarget,
    scheduler: S,
    presenter: P,
    clock: C,
}

impl<S, P, C> GameController<S, P, C>
where
    S: Scheduler,
    P: Presentation,
    C: Clock,
{
    /// Create an idle controller and show the instructions
    pub fn new(scheduler: S, mut presenter: P, clock: C, delays: DelayRange, share: ShareTarget) -> Self {
        presenter.display(DisplayCommand::ShowIdle);
        Self {
            state: GameState::Idle,
            pending_delay: None,
            next_handle: 0,
            started_at_ms: None,
            reaction_time_ms: None,
            delays,
            share,
            scheduler,
            presenter,
            clock,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// Last measured reaction time, only available in `Result`
    pub fn reaction_time_ms(&self) -> Option<u64> {
        self.reaction_time_ms
    }

    pub fn pending_delay(&self) -> Option<DelayHandle> {
        self.pending_delay
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    #[cfg(test)]
    fn started_at_ms(&self) -> Option<f64> {
        self.started_at_ms
    }

    /// Arm the surface and schedule the go cue after a random delay
    pub fn start_requested(&mut self) -> Outcome {
        if self.state != GameState::Idle {
            debug!("Start ignored in state {}", self.state);
            return Outcome::Ignored;
        }

        self.cancel_pending_delay();

        let delay = self.delays.sample();
        let handle = DelayHandle(self.next_handle);
        self.next_handle += 1;
        self.scheduler.schedule(handle, delay);
        self.pending_delay = Some(handle);

        self.state = GameState::Waiting;
        self.presenter.display(DisplayCommand::ShowWaiting);
        info!("Game started, go cue in {}ms ({})", delay.as_millis(), handle);
        Outcome::Applied
    }

    /// Deliver a fired cue delay. Handles other than the outstanding one are stale.
    pub fn delay_elapsed(&mut self, handle: DelayHandle) -> Outcome {
        if self.state != GameState::Waiting || self.pending_delay != Some(handle) {
            debug!("Stale {} ignored in state {}", handle, self.state);
            return Outcome::Ignored;
        }

        self.pending_delay = None;
        self.started_at_ms = Some(self.clock.now_ms());
        self.state = GameState::Ready;
        self.presenter.display(DisplayCommand::ShowReady);
        info!("Go cue shown");
        Outcome::Applied
    }

    /// Handle a click on the play surface
    pub fn surface_activated(&mut self) -> Outcome {
        if !self.state.accepts_clicks() {
            debug!("Surface click ignored in state {}", self.state);
            return Outcome::Ignored;
        }

        if self.state == GameState::Waiting {
            self.cancel_pending_delay();
            self.state = GameState::Idle;
            self.presenter.display(DisplayCommand::ShowEarly);
            info!("Early click, back to idle");
            return Outcome::Applied;
        }

        let Some(started_at_ms) = self.started_at_ms else {
            warn!("Ready without a go cue timestamp, ignoring click");
            return Outcome::Ignored;
        };
        let elapsed = (self.clock.now_ms() - started_at_ms).max(0.0);
        let reaction_time_ms = elapsed.round() as u64;

        self.reaction_time_ms = Some(reaction_time_ms);
        self.state = GameState::Result;
        self.presenter
            .display(DisplayCommand::ShowResult { reaction_time_ms });
        info!("Reaction time: {}ms", reaction_time_ms);
        Outcome::Applied
    }

    /// Return to the instruction screen from a result (or refresh it while idle)
    pub fn retry_requested(&mut self) -> Outcome {
        match self.state {
            GameState::Result | GameState::Idle => {
                self.started_at_ms = None;
                self.reaction_time_ms = None;
                self.state = GameState::Idle;
                self.presenter.display(DisplayCommand::ShowIdle);
                info!("Back to idle");
                Outcome::Applied
            }
            GameState::Waiting | GameState::Ready => {
                debug!("Retry ignored in state {}", self.state);
                Outcome::Ignored
            }
        }
    }

    /// Build and open a share intent for the current result
    pub fn share_requested(&mut self) -> Option<ShareIntent> {
        let reaction_time_ms = match (self.state, self.reaction_time_ms) {
            (GameState::Result, Some(ms)) => ms,
            _ => {
                debug!("Share ignored in state {}", self.state);
                return None;
            }
        };

        match self.share.intent(reaction_time_ms) {
            Ok(intent) => {
                self.presenter
                    .display(DisplayCommand::OpenShareIntent(intent.clone()));
                info!("Share intent opened for {}ms", reaction_time_ms);
                Some(intent)
            }
            Err(e) => {
                warn!("Failed to build share intent: {}", e);
                None
            }
        }
    }

    fn cancel_pending_delay(&mut self) {
        if let Some(handle) = self.pending_delay.take() {
            debug!("Cancelling {}", handle);
            self.scheduler.cancel(handle);
        }
    }
}
