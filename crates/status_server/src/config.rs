use std::fs;

use serde::Deserialize;

const SETTINGS_FILE: &str = "status_server.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_bind: String,
    pub initial_id: i64,
    pub initial_temperature: String,
    pub initial_figures: i64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:8080".into(),
            initial_id: 1,
            initial_temperature: "20".into(),
            initial_figures: 0,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    bind_addr: Option<String>,
    initial_id: Option<i64>,
    initial_temperature: Option<String>,
    initial_figures: Option<i64>,
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();
    if let Ok(raw) = fs::read_to_string(SETTINGS_FILE) {
        apply_file(&mut settings, &raw);
    }
    apply_env(&mut settings, |key| std::env::var(key).ok());
    settings
}

fn apply_file(settings: &mut Settings, raw: &str) {
    let Ok(file_cfg) = toml::from_str::<FileSettings>(raw) else {
        tracing::warn!(file = SETTINGS_FILE, "ignoring unreadable settings file");
        return;
    };
    if let Some(v) = file_cfg.bind_addr {
        settings.server_bind = v;
    }
    if let Some(v) = file_cfg.initial_id {
        settings.initial_id = v;
    }
    if let Some(v) = file_cfg.initial_temperature {
        settings.initial_temperature = v;
    }
    if let Some(v) = file_cfg.initial_figures {
        settings.initial_figures = v;
    }
}

fn apply_env(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("STATUS_SERVER_BIND") {
        settings.server_bind = v;
    }
    if let Some(v) = var("APP__BIND_ADDR") {
        settings.server_bind = v;
    }

    if let Some(v) = var("APP__INITIAL_ID") {
        if let Ok(parsed) = v.parse::<i64>() {
            settings.initial_id = parsed;
        }
    }

    if let Some(v) = var("APP__INITIAL_TEMPERATURE") {
        settings.initial_temperature = v;
    }

    if let Some(v) = var("APP__INITIAL_FIGURES") {
        if let Ok(parsed) = v.parse::<i64>() {
            settings.initial_figures = parsed;
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
