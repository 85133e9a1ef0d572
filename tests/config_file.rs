//! Integration tests for loading a config file from disk.
//!
//! Each test uses a unique file path to avoid parallel test interference.

use std::fs;

use infer_cli::config::{Config, ConfigError, KeySource};
use infer_cli::ProviderId;

fn write_config(name: &str, content: &str) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(name);
    fs::write(&path, content).expect("Failed to write temp config");
    path
}

#[test]
fn test_config_file_overrides_and_expansion() {
    let path = write_config(
        "infer_cli_config_overrides.toml",
        r#"
[http]
timeout_secs = 30

[logging]
level = "info"

[providers.openrouter]
base_url = "http://localhost:8089/api/v1"
api_key = "${INFER_CLI_TEST_OR_KEY}"
"#,
    );

    let config = Config::from_file(&path).unwrap();
    assert_eq!(config.http.timeout_secs, Some(30));
    assert_eq!(config.logging.level, "info");
    assert_eq!(
        config.base_url(ProviderId::OpenRouter),
        "http://localhost:8089/api/v1"
    );

    let (key, source) = config
        .resolve_key_with(ProviderId::OpenRouter, |name| {
            (name == "INFER_CLI_TEST_OR_KEY").then(|| "sk-or-file".to_string())
        })
        .unwrap();
    assert_eq!(key.unwrap().expose_secret(), "sk-or-file");
    assert_eq!(source, KeySource::EnvExpanded);

    // Untouched providers keep the conventional env var
    let (_, source) = config
        .resolve_key_with(ProviderId::Groq, |name| {
            (name == "GROQ_API_KEY").then(|| "gsk".to_string())
        })
        .unwrap();
    assert_eq!(source, KeySource::Convention("GROQ_API_KEY".to_string()));

    let _ = fs::remove_file(path);
}

#[test]
fn test_missing_config_file() {
    let path = std::env::temp_dir().join("infer_cli_definitely_missing.toml");
    let _ = fs::remove_file(&path);

    let err = Config::from_file(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("infer_cli_definitely_missing.toml"));
}

#[test]
fn test_malformed_config_file() {
    let path = write_config("infer_cli_config_malformed.toml", "[providers.groq\nbase_url = 1");

    let err = Config::from_file(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));

    let _ = fs::remove_file(path);
}
