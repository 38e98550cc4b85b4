use std::sync::Arc;

use async_trait::async_trait;
use shared::{
    domain::{PointSlot, Vec3},
    error::ErrorKind,
};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("{sink} sink is unavailable")]
    Unavailable { sink: &'static str },
    #[error("{sink} sink rejected {operation}: {reason}")]
    Rejected {
        sink: &'static str,
        operation: &'static str,
        reason: String,
    },
}

impl SinkError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::SinkUnavailable
    }
}

/// Playback component that renders the sensation from six control points.
#[async_trait]
pub trait HapticSink: Send + Sync {
    async fn set_point(&self, slot: PointSlot, value: Vec3) -> Result<(), SinkError>;
    async fn set_sensation_block(&self, block: &str) -> Result<(), SinkError>;
    async fn set_running(&self, running: bool) -> Result<(), SinkError>;
}

/// Six positioned slots mirroring the haptic control points on screen.
#[async_trait]
pub trait GeometrySink: Send + Sync {
    async fn set_position(&self, slot: PointSlot, value: Vec3) -> Result<(), SinkError>;
}

/// Haptic sink that only exists in logs, for running without hardware.
pub struct TracingHapticSink;

#[async_trait]
impl HapticSink for TracingHapticSink {
    async fn set_point(&self, slot: PointSlot, value: Vec3) -> Result<(), SinkError> {
        debug!(
            slot = slot.name(),
            x = value.x,
            y = value.y,
            z = value.z,
            "haptics: point updated"
        );
        Ok(())
    }

    async fn set_sensation_block(&self, block: &str) -> Result<(), SinkError> {
        info!(block, "haptics: sensation block selected");
        Ok(())
    }

    async fn set_running(&self, running: bool) -> Result<(), SinkError> {
        info!(running, "haptics: playback toggled");
        Ok(())
    }
}

pub struct TracingGeometrySink;

#[async_trait]
impl GeometrySink for TracingGeometrySink {
    async fn set_position(&self, slot: PointSlot, value: Vec3) -> Result<(), SinkError> {
        debug!(
            slot = slot.name(),
            x = value.x,
            y = value.y,
            z = value.z,
            "geometry: slot moved"
        );
        Ok(())
    }
}

/// Stand-in for a haptic device that could not be found.
pub struct MissingHapticSink;

#[async_trait]
impl HapticSink for MissingHapticSink {
    async fn set_point(&self, _slot: PointSlot, _value: Vec3) -> Result<(), SinkError> {
        Err(SinkError::Unavailable { sink: "haptic" })
    }

    async fn set_sensation_block(&self, _block: &str) -> Result<(), SinkError> {
        Err(SinkError::Unavailable { sink: "haptic" })
    }

    async fn set_running(&self, _running: bool) -> Result<(), SinkError> {
        Err(SinkError::Unavailable { sink: "haptic" })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SinkEvent {
    Point { slot: PointSlot, value: Vec3 },
    SensationBlock(String),
    Running(bool),
    Position { slot: PointSlot, value: Vec3 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailureMode {
    #[default]
    Never,
    /// Every call fails as if the device vanished.
    Always,
    /// Only `set_running(true)` fails.
    OnStart,
}

/// Records every write, in order, across both sink roles.
///
/// Clones share the same log so one instance can be handed out as the haptic
/// sink and another as the geometry sink while keeping a single ordering.
#[derive(Clone, Default)]
pub struct RecordingSink {
    events: Arc<Mutex<Vec<SinkEvent>>>,
    failure: Arc<Mutex<FailureMode>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_failure_mode(&self, mode: FailureMode) {
        *self.failure.lock().await = mode;
    }

    pub async fn events(&self) -> Vec<SinkEvent> {
        self.events.lock().await.clone()
    }

    pub async fn clear(&self) {
        self.events.lock().await.clear();
    }

    async fn record(
        &self,
        sink: &'static str,
        event: SinkEvent,
    ) -> Result<(), SinkError> {
        match *self.failure.lock().await {
            FailureMode::Always => return Err(SinkError::Unavailable { sink }),
            FailureMode::OnStart if event == SinkEvent::Running(true) => {
                return Err(SinkError::Rejected {
                    sink,
                    operation: "start",
                    reason: "playback refused".into(),
                })
            }
            _ => {}
        }
        self.events.lock().await.push(event);
        Ok(())
    }
}

#[async_trait]
impl HapticSink for RecordingSink {
    async fn set_point(&self, slot: PointSlot, value: Vec3) -> Result<(), SinkError> {
        self.record("haptic", SinkEvent::Point { slot, value }).await
    }

    async fn set_sensation_block(&self, block: &str) -> Result<(), SinkError> {
        self.record("haptic", SinkEvent::SensationBlock(block.to_string()))
            .await
    }

    async fn set_running(&self, running: bool) -> Result<(), SinkError> {
        self.record("haptic", SinkEvent::Running(running)).await
    }
}

#[async_trait]
impl GeometrySink for RecordingSink {
    async fn set_position(&self, slot: PointSlot, value: Vec3) -> Result<(), SinkError> {
        self.record("geometry", SinkEvent::Position { slot, value })
            .await
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
