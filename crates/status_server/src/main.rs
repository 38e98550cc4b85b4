use std::{net::SocketAddr, sync::Arc};

use axum::{extract::State, routing::get, Json, Router};
use shared::{
    domain::{DeploymentVariant, ShapeId},
    protocol::{StatusPayload, StatusUpdateRequest},
};
use tokio::sync::RwLock;
use tracing::info;

mod config;

use config::{load_settings, Settings};

struct AppState {
    status: RwLock<StatusPayload>,
}

impl AppState {
    fn from_settings(settings: &Settings) -> Self {
        Self {
            status: RwLock::new(StatusPayload {
                id: settings.initial_id,
                temperature: settings.initial_temperature.clone(),
                state: Some(state_for_figures(settings.initial_figures)),
                figures: Some(settings.initial_figures),
            }),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let settings = load_settings();
    let app = build_router(Arc::new(AppState::from_settings(&settings)));

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, "status server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/status", get(current_status).post(update_status))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn current_status(State(state): State<Arc<AppState>>) -> Json<Vec<StatusPayload>> {
    Json(vec![state.status.read().await.clone()])
}

async fn update_status(
    State(state): State<Arc<AppState>>,
    Json(req): Json<StatusUpdateRequest>,
) -> Json<Vec<StatusPayload>> {
    let mut status = state.status.write().await;
    apply_update(&mut status, req);
    info!(
        id = status.id,
        state = ?status.state,
        figures = ?status.figures,
        "status updated"
    );
    Json(vec![status.clone()])
}

/// Keeps `state` and `figures` agreeing on whether anything plays, so both
/// deployment variants see the same on/off decision.
fn apply_update(status: &mut StatusPayload, req: StatusUpdateRequest) {
    if let Some(id) = req.id {
        status.id = id;
    }
    if let Some(temperature) = req.temperature {
        status.temperature = temperature;
    }
    match (req.state, req.figures) {
        (state, Some(figures)) => {
            status.figures = Some(figures);
            status.state = Some(state.unwrap_or_else(|| state_for_figures(figures)));
        }
        (Some(state), None) => {
            status.state = Some(state);
            status.figures = Some(i64::from(state == 1));
        }
        (None, None) => {}
    }
}

/// `1` when the figures code selects a shape, `0` when it deactivates.
fn state_for_figures(figures: i64) -> i64 {
    i64::from(!ShapeId::from_code(DeploymentVariant::Figures, figures).is_none())
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
