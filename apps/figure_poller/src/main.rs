use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use figure_core::{FigureController, HttpStatusSource, StatusPoller};
use haptics_integration::{GeometrySink, HapticSink, TracingGeometrySink, TracingHapticSink};
use shared::domain::DeploymentVariant;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod config;

use config::{load_settings, Overrides};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum VariantArg {
    State,
    Figures,
}

impl From<VariantArg> for DeploymentVariant {
    fn from(value: VariantArg) -> Self {
        match value {
            VariantArg::State => DeploymentVariant::State,
            VariantArg::Figures => DeploymentVariant::Figures,
        }
    }
}

/// Polls a figure status endpoint and drives haptic playback from it.
#[derive(Parser, Debug)]
struct Args {
    /// Settings file; missing files are skipped.
    #[arg(long, default_value = "figure.toml")]
    config: PathBuf,
    #[arg(long)]
    endpoint_url: Option<String>,
    /// Seconds between polls.
    #[arg(long)]
    interval: Option<f64>,
    /// Seconds before a single request is abandoned.
    #[arg(long)]
    timeout: Option<f64>,
    #[arg(long)]
    scale: Option<f32>,
    #[arg(long, value_enum)]
    variant: Option<VariantArg>,
    #[arg(long)]
    sensation_block: Option<String>,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            endpoint_url: self.endpoint_url.clone(),
            request_interval_secs: self.interval,
            request_timeout_secs: self.timeout,
            scale_factor: self.scale,
            variant: self.variant.map(Into::into),
            sensation_block: self.sensation_block.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();
    let args = Args::parse();

    let mut settings = load_settings(&args.config)?;
    settings.apply_overrides(args.overrides());
    let config = settings
        .resolve()
        .context("invalid figure poller configuration")?;

    let haptic: Arc<dyn HapticSink> = Arc::new(TracingHapticSink);
    let geometry = config
        .controller
        .variant
        .drives_geometry()
        .then(|| Arc::new(TracingGeometrySink) as Arc<dyn GeometrySink>);
    let controller = FigureController::new(config.controller.clone(), haptic, geometry)
        .await
        .map_err(|error| {
            error!(%error, "haptic sink unavailable; figure controller not started");
            error
        })?;

    let source = HttpStatusSource::new(config.endpoint.clone(), config.request_timeout)?;
    info!(
        endpoint = %config.endpoint,
        interval_ms = config.request_interval.as_millis() as u64,
        timeout_ms = config.request_timeout.as_millis() as u64,
        "figure poller starting"
    );
    let handle = StatusPoller::new(source, controller, config.request_interval).spawn();

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for ctrl-c")?;
    info!("shutdown requested");

    let mut controller = handle.stop().await?;
    controller
        .shutdown()
        .await
        .context("failed to stop haptic playback on exit")?;
    Ok(())
}
