use std::time::Duration;

use anyhow::{Context, Result};
use shared::{domain::ActiveFigureState, protocol::parse_status};
use tokio::{sync::watch, task::JoinHandle};
use tracing::{debug, info, warn};

use crate::{
    controller::{FigureController, Transition},
    transport::StatusSource,
    CycleError,
};

pub const DEFAULT_REQUEST_INTERVAL: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollPhase {
    Idle,
    Fetching,
    Waiting,
    Stopped,
}

/// Fetch, parse, dispatch, wait; forever, until stopped.
pub struct StatusPoller<S> {
    source: S,
    controller: FigureController,
    interval: Duration,
}

impl<S: StatusSource + 'static> StatusPoller<S> {
    pub fn new(source: S, controller: FigureController, interval: Duration) -> Self {
        Self {
            source,
            controller,
            interval,
        }
    }

    pub fn controller(&self) -> &FigureController {
        &self.controller
    }

    /// Runs exactly one fetch and dispatches its result.
    pub async fn poll_once(&mut self) -> Result<Transition, CycleError> {
        let body = self.source.fetch_status().await?;
        self.dispatch(&body).await
    }

    async fn dispatch(&mut self, body: &str) -> Result<Transition, CycleError> {
        debug!(body, "poller: response received");
        let record = parse_status(body, self.controller.variant())?;
        Ok(self.controller.on_status(&record).await?)
    }

    pub fn spawn(self) -> PollerHandle {
        let (stop_tx, stop_rx) = watch::channel(false);
        let (phase_tx, phase_rx) = watch::channel(PollPhase::Idle);
        let (state_tx, state_rx) = watch::channel(self.controller.state());
        let task = tokio::spawn(self.run(stop_rx, phase_tx, state_tx));
        PollerHandle {
            stop_tx,
            phase_rx,
            state_rx,
            task,
        }
    }

    async fn run(
        mut self,
        mut stop_rx: watch::Receiver<bool>,
        phase_tx: watch::Sender<PollPhase>,
        state_tx: watch::Sender<ActiveFigureState>,
    ) -> FigureController {
        info!(
            interval_ms = self.interval.as_millis() as u64,
            variant = ?self.controller.variant(),
            "poller: started"
        );

        let mut detached = false;
        loop {
            if *stop_rx.borrow() {
                break;
            }

            phase_tx.send_replace(PollPhase::Fetching);
            let fetched = self.source.fetch_status().await;
            if *stop_rx.borrow() {
                debug!("poller: stop requested while fetching, response dropped");
                break;
            }

            let outcome = match fetched {
                Ok(body) => self.dispatch(&body).await,
                Err(error) => Err(error.into()),
            };
            match outcome {
                Ok(Transition::Unchanged) => {}
                Ok(transition) => info!(?transition, "poller: figure changed"),
                Err(error) => warn!(kind = ?error.kind(), %error, "poller: cycle skipped"),
            }
            state_tx.send_replace(self.controller.state());

            phase_tx.send_replace(PollPhase::Waiting);
            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                changed = stop_rx.changed() => {
                    if changed.is_err() {
                        debug!("poller: handle dropped");
                        detached = true;
                        break;
                    }
                }
            }
        }

        // Nobody will get the controller back to release the sinks.
        if detached {
            if let Err(error) = self.controller.shutdown().await {
                warn!(kind = ?error.kind(), %error, "poller: failed to stop playback");
            }
            state_tx.send_replace(self.controller.state());
        }

        phase_tx.send_replace(PollPhase::Stopped);
        info!("poller: stopped");
        self.controller
    }
}

/// Owner side of a spawned poller.
///
/// Dropping the handle also stops the loop at its next wait and stops any
/// playing figure; `stop()` instead leaves playback to the caller.
pub struct PollerHandle {
    stop_tx: watch::Sender<bool>,
    phase_rx: watch::Receiver<PollPhase>,
    state_rx: watch::Receiver<ActiveFigureState>,
    task: JoinHandle<FigureController>,
}

impl PollerHandle {
    pub fn phase(&self) -> PollPhase {
        *self.phase_rx.borrow()
    }

    pub fn state(&self) -> ActiveFigureState {
        *self.state_rx.borrow()
    }

    pub fn subscribe_phase(&self) -> watch::Receiver<PollPhase> {
        self.phase_rx.clone()
    }

    pub fn subscribe_state(&self) -> watch::Receiver<ActiveFigureState> {
        self.state_rx.clone()
    }

    pub fn request_stop(&self) {
        self.stop_tx.send_replace(true);
    }

    /// Stops the loop and hands the controller back. An in-flight fetch is
    /// allowed to finish, so this waits at most one request timeout.
    pub async fn stop(self) -> Result<FigureController> {
        self.request_stop();
        self.task.await.context("poller task panicked")
    }
}

#[cfg(test)]
#[path = "tests/poller_tests.rs"]
mod tests;
