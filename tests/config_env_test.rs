//! Config environment variable tests
//!
//! These tests verify that Config::from_env() correctly reads and applies
//! environment variable overrides.
//!
//! Tests use #[serial] to prevent race conditions with shared env vars.

use incident_wizard::config::{Config, LogFormat, SimilarityStrategy};
use serial_test::serial;
use std::env;

const VARS: &[&str] = &[
    "BACKEND_BASE_URL",
    "REQUEST_TIMEOUT_MS",
    "LOG_LEVEL",
    "LOG_FORMAT",
    "DUPLICATE_THRESHOLD",
    "RECENT_INCIDENT_LIMIT",
    "SIMILARITY_STRATEGY",
    "APP_VERSION",
    "PAGE_URL",
    "USER_AGENT",
    "METADATA_PATH",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_config_defaults() {
    clear_env();

    let config = Config::from_env().unwrap();
    assert_eq!(config.backend.base_url, "http://localhost:5000");
    assert_eq!(config.request.timeout_ms, 30000);
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.format, LogFormat::Pretty);
    assert_eq!(config.wizard.duplicate_threshold, 0.8);
    assert_eq!(config.wizard.recent_incident_limit, 100);
    assert_eq!(config.wizard.similarity, SimilarityStrategy::Lexical);
    assert_eq!(config.client.version, "1.0.0");
    assert!(config.client.metadata_path.is_none());
}

#[test]
#[serial]
fn test_config_from_env_overrides() {
    clear_env();
    env::set_var("BACKEND_BASE_URL", "https://incidents.internal");
    env::set_var("REQUEST_TIMEOUT_MS", "60000");
    env::set_var("LOG_FORMAT", "JSON");
    env::set_var("DUPLICATE_THRESHOLD", "0.65");
    env::set_var("RECENT_INCIDENT_LIMIT", "25");
    env::set_var("SIMILARITY_STRATEGY", "Remote");
    env::set_var("METADATA_PATH", "/srv/metadata.json");

    let config = Config::from_env().unwrap();
    assert_eq!(config.backend.base_url, "https://incidents.internal");
    assert_eq!(config.request.timeout_ms, 60000);
    assert_eq!(config.logging.format, LogFormat::Json);
    assert_eq!(config.wizard.duplicate_threshold, 0.65);
    assert_eq!(config.wizard.recent_incident_limit, 25);
    assert_eq!(config.wizard.similarity, SimilarityStrategy::Remote);
    assert_eq!(
        config.client.metadata_path.unwrap().to_str().unwrap(),
        "/srv/metadata.json"
    );

    clear_env();
}

#[test]
#[serial]
fn test_config_malformed_numbers_fall_back() {
    clear_env();
    env::set_var("REQUEST_TIMEOUT_MS", "soon");
    env::set_var("RECENT_INCIDENT_LIMIT", "-3");
    env::set_var("DUPLICATE_THRESHOLD", "high");

    let config = Config::from_env().unwrap();
    assert_eq!(config.request.timeout_ms, 30000);
    assert_eq!(config.wizard.recent_incident_limit, 100);
    assert_eq!(config.wizard.duplicate_threshold, 0.8);

    clear_env();
}

#[test]
#[serial]
fn test_config_threshold_is_clamped() {
    clear_env();
    env::set_var("DUPLICATE_THRESHOLD", "1.5");

    let config = Config::from_env().unwrap();
    assert_eq!(config.wizard.duplicate_threshold, 1.0);

    clear_env();
}

#[test]
#[serial]
fn test_config_rejects_unknown_strategy() {
    clear_env();
    env::set_var("SIMILARITY_STRATEGY", "embeddings");

    let result = Config::from_env();
    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("SIMILARITY_STRATEGY"));

    clear_env();
}
