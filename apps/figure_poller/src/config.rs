use std::{fs, path::Path, time::Duration};

use anyhow::{anyhow, bail, Context, Result};
use figure_core::{
    controller::{DEFAULT_SCALE_FACTOR, DEFAULT_SENSATION_BLOCK},
    poller::DEFAULT_REQUEST_INTERVAL,
    transport::DEFAULT_REQUEST_TIMEOUT,
    ControllerSettings,
};
use serde::Deserialize;
use shared::domain::DeploymentVariant;
use url::Url;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub endpoint_url: Option<String>,
    pub request_interval_secs: f64,
    pub request_timeout_secs: f64,
    pub scale_factor: f32,
    pub variant: DeploymentVariant,
    pub sensation_block: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint_url: None,
            request_interval_secs: DEFAULT_REQUEST_INTERVAL.as_secs_f64(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT.as_secs_f64(),
            scale_factor: DEFAULT_SCALE_FACTOR,
            variant: DeploymentVariant::default(),
            sensation_block: DEFAULT_SENSATION_BLOCK.into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    endpoint_url: Option<String>,
    request_interval_secs: Option<f64>,
    request_timeout_secs: Option<f64>,
    scale_factor: Option<f32>,
    variant: Option<DeploymentVariant>,
    sensation_block: Option<String>,
}

/// Values given on the command line; they win over file and environment.
#[derive(Debug, Default)]
pub struct Overrides {
    pub endpoint_url: Option<String>,
    pub request_interval_secs: Option<f64>,
    pub request_timeout_secs: Option<f64>,
    pub scale_factor: Option<f32>,
    pub variant: Option<DeploymentVariant>,
    pub sensation_block: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PollerConfig {
    pub endpoint: Url,
    pub request_interval: Duration,
    pub request_timeout: Duration,
    pub controller: ControllerSettings,
}

pub fn load_settings(path: &Path) -> Result<Settings> {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        settings
            .apply_file(&raw)
            .with_context(|| format!("failed to parse settings file '{}'", path.display()))?;
    }
    settings.apply_env(|key| std::env::var(key).ok());

    Ok(settings)
}

impl Settings {
    fn apply_file(&mut self, raw: &str) -> Result<()> {
        let file_cfg: FileSettings = toml::from_str(raw)?;
        if let Some(v) = file_cfg.endpoint_url {
            self.endpoint_url = Some(v);
        }
        if let Some(v) = file_cfg.request_interval_secs {
            self.request_interval_secs = v;
        }
        if let Some(v) = file_cfg.request_timeout_secs {
            self.request_timeout_secs = v;
        }
        if let Some(v) = file_cfg.scale_factor {
            self.scale_factor = v;
        }
        if let Some(v) = file_cfg.variant {
            self.variant = v;
        }
        if let Some(v) = file_cfg.sensation_block {
            self.sensation_block = v;
        }
        Ok(())
    }

    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(v) = var("FIGURE_ENDPOINT_URL") {
            self.endpoint_url = Some(v);
        }
        if let Some(v) = var("APP__ENDPOINT_URL") {
            self.endpoint_url = Some(v);
        }

        if let Some(v) = var("APP__REQUEST_INTERVAL_SECS") {
            if let Ok(parsed) = v.parse::<f64>() {
                self.request_interval_secs = parsed;
            }
        }
        if let Some(v) = var("APP__REQUEST_TIMEOUT_SECS") {
            if let Ok(parsed) = v.parse::<f64>() {
                self.request_timeout_secs = parsed;
            }
        }
        if let Some(v) = var("APP__SCALE_FACTOR") {
            if let Ok(parsed) = v.parse::<f32>() {
                self.scale_factor = parsed;
            }
        }
        if let Some(v) = var("APP__VARIANT") {
            match v.to_ascii_lowercase().as_str() {
                "state" => self.variant = DeploymentVariant::State,
                "figures" => self.variant = DeploymentVariant::Figures,
                other => tracing::warn!(variant = other, "ignoring unknown APP__VARIANT"),
            }
        }
        if let Some(v) = var("APP__SENSATION_BLOCK") {
            self.sensation_block = v;
        }
    }

    pub fn apply_overrides(&mut self, overrides: Overrides) {
        if let Some(v) = overrides.endpoint_url {
            self.endpoint_url = Some(v);
        }
        if let Some(v) = overrides.request_interval_secs {
            self.request_interval_secs = v;
        }
        if let Some(v) = overrides.request_timeout_secs {
            self.request_timeout_secs = v;
        }
        if let Some(v) = overrides.scale_factor {
            self.scale_factor = v;
        }
        if let Some(v) = overrides.variant {
            self.variant = v;
        }
        if let Some(v) = overrides.sensation_block {
            self.sensation_block = v;
        }
    }

    pub fn resolve(self) -> Result<PollerConfig> {
        let raw_url = self
            .endpoint_url
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| {
                anyhow!("no endpoint configured; pass --endpoint-url or set FIGURE_ENDPOINT_URL")
            })?;
        let endpoint = Url::parse(raw_url.trim())
            .with_context(|| format!("invalid endpoint url '{raw_url}'"))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            bail!("endpoint url must use http or https, got '{}'", endpoint.scheme());
        }

        let request_interval = positive_duration("request interval", self.request_interval_secs)?;
        let request_timeout = positive_duration("request timeout", self.request_timeout_secs)?;

        if !self.scale_factor.is_finite() || self.scale_factor == 0.0 {
            bail!("scale factor must be finite and non-zero, got {}", self.scale_factor);
        }
        if self.sensation_block.trim().is_empty() {
            bail!("sensation block name must not be empty");
        }

        Ok(PollerConfig {
            endpoint,
            request_interval,
            request_timeout,
            controller: ControllerSettings {
                variant: self.variant,
                scale_factor: self.scale_factor,
                sensation_block: self.sensation_block,
            },
        })
    }
}

fn positive_duration(name: &str, secs: f64) -> Result<Duration> {
    if !secs.is_finite() || secs <= 0.0 {
        bail!("{name} must be a positive number of seconds, got {secs}");
    }
    Duration::try_from_secs_f64(secs)
        .map_err(|_| anyhow!("{name} of {secs} seconds is out of range"))
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
