// Unit tests for config loading, validation, and env overrides

use crate::config::{AppConfig, BASE_URL_ENV_VAR};
use crate::error::config::ConfigError;

use serial_test::serial;
use std::time::Duration;

/// **VALUE**: Verifies a missing config file yields the documented defaults.
///
/// **WHY THIS MATTERS**: First runs have no config directory content. The client must
/// still point at the local server with the stock routes and a 300 ms card transition.
#[test]
fn given_missing_file_when_loading_then_returns_defaults() {
    // GIVEN: An empty directory
    let dir = tempfile::tempdir().unwrap();

    // WHEN: Loading
    let config = AppConfig::load(dir.path()).unwrap();

    // THEN: Defaults apply
    assert_eq!(config, AppConfig::default());
    assert_eq!(config.server.base_url, "http://127.0.0.1:5000");
    assert_eq!(config.server.request_timeout(), None);
    assert_eq!(config.routes.landing_path, "/app");
    assert_eq!(config.routes.static_prefix, "/static/");
    assert_eq!(config.ui.excerpt_chars, 120);
    assert_eq!(config.ui.card_removal_delay(), Duration::from_millis(300));
}

/// **VALUE**: Verifies save then load returns the same values.
///
/// **BUG THIS CATCHES**: Would catch a field missing its serde default or a temp file
/// left behind instead of being renamed into place.
#[test]
fn given_saved_config_when_loaded_then_values_preserved() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = AppConfig::default();
    config.server.base_url = String::from("https://scan.example.org");
    config.server.request_timeout_secs = Some(45);
    config.ui.card_removal_delay_ms = 0;

    config.save(dir.path()).unwrap();
    let loaded = AppConfig::load(dir.path()).unwrap();

    assert_eq!(loaded, config);
    assert!(!dir.path().join("config.json.tmp").exists());
}

#[test]
fn given_partial_file_when_loaded_then_missing_sections_defaulted() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("config.json"),
        r#"{"server": {"base_url": "http://10.0.0.5:8080"}}"#,
    )
    .unwrap();

    let config = AppConfig::load(dir.path()).unwrap();

    assert_eq!(config.server.base_url, "http://10.0.0.5:8080");
    assert_eq!(config.routes.history_path, "/history");
}

#[test]
fn given_corrupt_file_when_loaded_then_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("config.json"), "{ not json").unwrap();

    let result = AppConfig::load(dir.path());

    assert!(matches!(result, Err(ConfigError::ParseError { .. })));
}

#[test]
fn given_non_http_base_url_when_validated_then_rejected() {
    let mut config = AppConfig::default();
    config.server.base_url = String::from("ftp://scan.example.org");

    assert!(matches!(
        config.validate(),
        Err(ConfigError::ValidationError { .. })
    ));
}

#[test]
fn given_relative_static_prefix_when_validated_then_rejected() {
    let mut config = AppConfig::default();
    config.routes.static_prefix = String::from("static/");

    let error = config.validate().unwrap_err();

    assert!(error.to_string().contains("static_prefix"));
}

#[test]
fn given_zero_excerpt_when_validated_then_rejected() {
    let mut config = AppConfig::default();
    config.ui.excerpt_chars = 0;

    assert!(config.validate().is_err());
}

/// **VALUE**: Verifies the base URL environment override.
///
/// **WHY THIS MATTERS**: Deployments point the console at a different server without
/// editing the config file.
#[test]
#[serial]
fn given_env_override_when_applied_then_base_url_replaced() {
    // SAFETY: serialized with the other env tests; no other thread reads this variable
    unsafe { std::env::set_var(BASE_URL_ENV_VAR, "https://override.example.org") };

    let mut config = AppConfig::default();
    config.apply_env_overrides();

    unsafe { std::env::remove_var(BASE_URL_ENV_VAR) };
    assert_eq!(config.server.base_url, "https://override.example.org");
}

#[test]
#[serial]
fn given_empty_env_override_when_applied_then_base_url_kept() {
    // SAFETY: serialized with the other env tests; no other thread reads this variable
    unsafe { std::env::set_var(BASE_URL_ENV_VAR, "") };

    let mut config = AppConfig::default();
    config.apply_env_overrides();

    unsafe { std::env::remove_var(BASE_URL_ENV_VAR) };
    assert_eq!(config.server.base_url, "http://127.0.0.1:5000");
}
