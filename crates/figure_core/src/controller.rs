use std::sync::Arc;

use haptics_integration::{GeometrySink, HapticSink, SinkError};
use shared::domain::{ActiveFigureState, DeploymentVariant, PointSlot, ShapeId, StatusRecord};
use tracing::{debug, info, warn};

use crate::catalog::{coordinates_for, scaled};

pub const DEFAULT_SCALE_FACTOR: f32 = 3000.0;
pub const DEFAULT_SENSATION_BLOCK: &str = "Polyline6";

#[derive(Debug, Clone)]
pub struct ControllerSettings {
    pub variant: DeploymentVariant,
    pub scale_factor: f32,
    pub sensation_block: String,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            variant: DeploymentVariant::default(),
            scale_factor: DEFAULT_SCALE_FACTOR,
            sensation_block: DEFAULT_SENSATION_BLOCK.into(),
        }
    }
}

/// What a single status dispatch did to the sinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Unchanged,
    Activated(ShapeId),
    Deactivated(ShapeId),
    Switched { from: ShapeId, to: ShapeId },
}

/// Sole writer of the haptic and geometry sinks.
///
/// The recorded [`ActiveFigureState`] only ever reflects a sink transition
/// that completed: a failed stop keeps the old figure, a failed start leaves
/// the controller inactive so the next matching status retries it.
pub struct FigureController {
    settings: ControllerSettings,
    haptic: Arc<dyn HapticSink>,
    geometry: Option<Arc<dyn GeometrySink>>,
    state: ActiveFigureState,
}

impl FigureController {
    /// Resets playback on the haptic sink. Fails when the sink is unusable;
    /// callers report that once and do not retry.
    pub async fn new(
        settings: ControllerSettings,
        haptic: Arc<dyn HapticSink>,
        geometry: Option<Arc<dyn GeometrySink>>,
    ) -> Result<Self, SinkError> {
        haptic.set_running(false).await?;

        let geometry = match geometry {
            Some(_) if !settings.variant.drives_geometry() => {
                warn!(
                    variant = ?settings.variant,
                    "figure: geometry sink ignored for this deployment variant"
                );
                None
            }
            other => other,
        };

        Ok(Self {
            settings,
            haptic,
            geometry,
            state: ActiveFigureState::inactive(),
        })
    }

    pub fn state(&self) -> ActiveFigureState {
        self.state
    }

    pub fn variant(&self) -> DeploymentVariant {
        self.settings.variant
    }

    pub async fn on_status(&mut self, record: &StatusRecord) -> Result<Transition, SinkError> {
        let target = ShapeId::from_code(self.settings.variant, record.state_code);
        let current = self.state.current_shape;
        debug!(
            id = record.id,
            temperature = %record.temperature,
            code = record.state_code,
            ?target,
            "figure: status received"
        );

        if target == current {
            return Ok(Transition::Unchanged);
        }

        if !current.is_none() {
            self.deactivate().await?;
        }

        if target.is_none() {
            return Ok(Transition::Deactivated(current));
        }

        self.activate(target).await?;
        Ok(if current.is_none() {
            Transition::Activated(target)
        } else {
            Transition::Switched {
                from: current,
                to: target,
            }
        })
    }

    /// Stops whatever is playing. Used when the poller goes away.
    pub async fn shutdown(&mut self) -> Result<(), SinkError> {
        if self.state.current_shape.is_none() {
            return Ok(());
        }
        self.deactivate().await
    }

    async fn deactivate(&mut self) -> Result<(), SinkError> {
        let previous = self.state.current_shape;
        self.haptic.set_running(false).await?;
        self.state = ActiveFigureState::inactive();
        info!(shape = ?previous, "figure: deactivated");
        Ok(())
    }

    async fn activate(&mut self, shape: ShapeId) -> Result<(), SinkError> {
        let Some(points) = coordinates_for(shape) else {
            return Ok(());
        };
        let points = scaled(&points, self.settings.scale_factor);

        for slot in PointSlot::ALL {
            self.haptic.set_point(slot, points[slot.index()]).await?;
        }
        if let Some(geometry) = &self.geometry {
            for slot in PointSlot::ALL {
                geometry.set_position(slot, points[slot.index()]).await?;
            }
        }
        self.haptic
            .set_sensation_block(&self.settings.sensation_block)
            .await?;
        self.haptic.set_running(true).await?;

        self.state = ActiveFigureState::playing(shape);
        info!(
            ?shape,
            block = %self.settings.sensation_block,
            scale = self.settings.scale_factor,
            "figure: activated"
        );
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
