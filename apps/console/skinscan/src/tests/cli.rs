use crate::cli::Cli;

use client_core::config::AppConfig;

use std::path::PathBuf;

use clap::Parser;

#[test]
fn given_all_flags_when_parsed_then_fields_set() {
    let cli = Cli::try_parse_from([
        "skinscan",
        "--config-dir",
        "/tmp/skinscan",
        "--base-url",
        "http://scanner.local:8080",
        "--verbose",
    ])
    .unwrap();

    assert_eq!(cli.config_dir(), PathBuf::from("/tmp/skinscan"));
    assert_eq!(cli.log_dir(), PathBuf::from("/tmp/skinscan/logs"));
    assert_eq!(cli.base_url.as_deref(), Some("http://scanner.local:8080"));
    assert!(cli.verbose);
}

/// **VALUE**: Verifies the config directory always resolves to something usable.
#[test]
fn given_no_flags_when_parsed_then_defaults_apply() {
    let cli = Cli::try_parse_from(["skinscan"]).unwrap();

    assert!(cli.base_url.is_none());
    assert!(!cli.verbose);
    assert!(cli.log_dir().ends_with("logs"));
}

#[test]
fn given_unknown_flag_when_parsed_then_error() {
    assert!(Cli::try_parse_from(["skinscan", "--bogus"]).is_err());
}

/// **VALUE**: Verifies `--save-config` writes the effective config, command-line URL included.
///
/// **BUG THIS CATCHES**: Would catch the flag being parsed but never acted on, or the
/// defaults being saved instead of the overridden values.
#[test]
fn given_save_flag_when_persisting_then_config_written_and_reloadable() {
    // GIVEN: A config directory and an overridden base URL
    let temp_dir = tempfile::tempdir().unwrap();
    let dir = temp_dir.path().to_str().unwrap();
    let cli = Cli::try_parse_from(["skinscan", "--config-dir", dir, "--save-config"]).unwrap();
    let mut config = AppConfig::default();
    config.server.base_url = String::from("http://scanner.local:8080");

    // WHEN: Persisting
    let written = cli.persist(&config).unwrap();

    // THEN: The file reloads to the same config
    assert!(written);
    assert_eq!(AppConfig::load(temp_dir.path()).unwrap(), config);
}

#[test]
fn given_no_save_flag_when_persisting_then_nothing_written() {
    let temp_dir = tempfile::tempdir().unwrap();
    let dir = temp_dir.path().to_str().unwrap();
    let cli = Cli::try_parse_from(["skinscan", "--config-dir", dir]).unwrap();

    let written = cli.persist(&AppConfig::default()).unwrap();

    assert!(!written);
    assert!(!temp_dir.path().join("config.json").exists());
}
