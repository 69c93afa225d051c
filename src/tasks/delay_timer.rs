//! Cue delay timer running on the tokio runtime

use std::{sync::Arc, time::Duration};
use tokio::{
    sync::mpsc::{UnboundedReceiver, UnboundedSender},
    task::JoinHandle,
    time::sleep,
};
use tracing::{debug, error, info};

use crate::{
    game::{DelayHandle, Scheduler},
    state::AppState,
};

/// Scheduler that sleeps in a spawned task and reports the fired handle
/// over a channel. Cancelling aborts the sleeping task.
#[derive(Debug)]
pub struct TokioDelayScheduler {
    fired_tx: UnboundedSender<DelayHandle>,
    pending: Option<(DelayHandle, JoinHandle<()>)>,
}

impl TokioDelayScheduler {
    pub fn new(fired_tx: UnboundedSender<DelayHandle>) -> Self {
        Self {
            fired_tx,
            pending: None,
        }
    }

    #[cfg(test)]
    fn is_armed(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|(_, task)| !task.is_finished())
    }
}

impl Scheduler for TokioDelayScheduler {
    fn schedule(&mut self, handle: DelayHandle, delay: Duration) {
        if let Some((previous, task)) = self.pending.take() {
            debug!("Replacing {} with {}", previous, handle);
            task.abort();
        }

        let fired_tx = self.fired_tx.clone();
        let task = tokio::spawn(async move {
            sleep(delay).await;
            if fired_tx.send(handle).is_err() {
                debug!("Delay channel closed, dropping {}", handle);
            }
        });
        self.pending = Some((handle, task));
    }

    fn cancel(&mut self, handle: DelayHandle) {
        match self.pending.take() {
            Some((pending, task)) if pending == handle => {
                task.abort();
                debug!("Aborted delay task for {}", handle);
            }
            other => self.pending = other,
        }
    }
}

impl Drop for TokioDelayScheduler {
    fn drop(&mut self) {
        if let Some((_, task)) = self.pending.take() {
            task.abort();
        }
    }
}

/// Background task delivering fired delays to the game, one at a time
pub async fn delay_timer_task(state: Arc<AppState>, mut fired_rx: UnboundedReceiver<DelayHandle>) {
    info!("Starting delay timer task");

    while let Some(handle) = fired_rx.recv().await {
        debug!("Delay timer fired: {}", handle);
        if let Err(e) = state.delay_elapsed(handle) {
            error!("Failed to deliver {}: {}", handle, e);
        }
    }

    info!("Delay channel closed, delay timer task exiting");
}
