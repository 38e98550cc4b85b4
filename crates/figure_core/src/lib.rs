//! Polls a remote figure status and drives the haptic and geometry sinks.

use haptics_integration::SinkError;
use shared::error::{ErrorKind, ParseError};
use thiserror::Error;

pub mod catalog;
pub mod controller;
pub mod poller;
pub mod transport;

pub use controller::{ControllerSettings, FigureController, Transition};
pub use poller::{PollPhase, PollerHandle, StatusPoller};
pub use transport::{FetchError, HttpStatusSource, StatusSource};

/// Anything that can cost the poller one cycle.
#[derive(Debug, Error)]
pub enum CycleError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Sink(#[from] SinkError),
}

impl CycleError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CycleError::Fetch(error) => error.kind(),
            CycleError::Parse(error) => error.kind(),
            CycleError::Sink(error) => error.kind(),
        }
    }
}
