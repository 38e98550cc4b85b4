use std::{
    collections::HashMap,
    env,
    time::{SystemTime, UNIX_EPOCH},
};

use super::*;

fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

fn with_endpoint() -> Settings {
    Settings {
        endpoint_url: Some("http://127.0.0.1:8080/status".into()),
        ..Settings::default()
    }
}

#[test]
fn defaults_match_the_documented_values() {
    let config = with_endpoint().resolve().expect("resolve");
    assert_eq!(config.request_interval, Duration::from_secs(2));
    assert_eq!(config.request_timeout, Duration::from_secs(5));
    assert_eq!(config.controller.scale_factor, 3000.0);
    assert_eq!(config.controller.sensation_block, "Polyline6");
    assert_eq!(config.controller.variant, DeploymentVariant::State);
}

#[test]
fn missing_endpoint_is_rejected() {
    let err = Settings::default().resolve().expect_err("no url");
    assert!(err.to_string().contains("no endpoint configured"), "{err}");

    let err = Settings {
        endpoint_url: Some("   ".into()),
        ..Settings::default()
    }
    .resolve()
    .expect_err("blank url");
    assert!(err.to_string().contains("no endpoint configured"), "{err}");
}

#[test]
fn non_http_endpoint_is_rejected() {
    let err = Settings {
        endpoint_url: Some("ftp://example.com/status".into()),
        ..Settings::default()
    }
    .resolve()
    .expect_err("ftp");
    assert!(err.to_string().contains("http or https"), "{err}");
}

#[test]
fn non_positive_timings_are_rejected() {
    for (interval, timeout) in [(0.0, 5.0), (2.0, -1.0), (f64::NAN, 5.0)] {
        let settings = Settings {
            request_interval_secs: interval,
            request_timeout_secs: timeout,
            ..with_endpoint()
        };
        assert!(settings.resolve().is_err(), "{interval} / {timeout}");
    }
}

#[test]
fn zero_scale_is_rejected() {
    let settings = Settings {
        scale_factor: 0.0,
        ..with_endpoint()
    };
    assert!(settings.resolve().is_err());
}

#[test]
fn file_then_env_then_cli_precedence() {
    let mut settings = Settings::default();
    settings
        .apply_file(
            r#"
endpoint_url = "http://file.local/status"
request_interval_secs = 0.5
variant = "figures"
"#,
        )
        .expect("file");
    settings.apply_env(env_of(&[
        ("FIGURE_ENDPOINT_URL", "http://env.local/status"),
        ("APP__SCALE_FACTOR", "1500"),
    ]));
    settings.apply_overrides(Overrides {
        scale_factor: Some(10.0),
        ..Overrides::default()
    });

    let config = settings.resolve().expect("resolve");
    assert_eq!(config.endpoint.as_str(), "http://env.local/status");
    assert_eq!(config.request_interval, Duration::from_millis(500));
    assert_eq!(config.controller.variant, DeploymentVariant::Figures);
    assert_eq!(config.controller.scale_factor, 10.0);
}

#[test]
fn app_prefixed_env_wins_and_unknown_variant_is_ignored() {
    let mut settings = Settings::default();
    settings.apply_env(env_of(&[
        ("FIGURE_ENDPOINT_URL", "http://plain.local/status"),
        ("APP__ENDPOINT_URL", "http://app.local/status"),
        ("APP__VARIANT", "hexagon"),
        ("APP__REQUEST_TIMEOUT_SECS", "soon"),
    ]));
    assert_eq!(
        settings.endpoint_url.as_deref(),
        Some("http://app.local/status")
    );
    assert_eq!(settings.variant, DeploymentVariant::State);
    assert_eq!(settings.request_timeout_secs, 5.0);
}

#[test]
fn malformed_settings_file_is_an_error() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("figure_poller_settings_{suffix}.toml"));
    fs::write(&path, "request_interval_secs = \"fast\"").expect("write");

    let err = load_settings(&path).expect_err("bad file");
    assert!(err.to_string().contains("failed to parse settings file"), "{err}");

    fs::remove_file(path).expect("cleanup");
}

#[test]
fn huge_timings_are_rejected_instead_of_overflowing() {
    let err = Settings {
        request_interval_secs: 1e30,
        ..with_endpoint()
    }
    .resolve()
    .expect_err("interval out of range");
    assert!(err.to_string().contains("out of range"), "{err}");

    let settings = Settings {
        request_timeout_secs: f64::MAX,
        ..with_endpoint()
    };
    assert!(settings.resolve().is_err());
}
