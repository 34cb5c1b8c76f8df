//! Configuration module for the strategy gate.
//!
//! YAML configuration with environment variable interpolation and
//! validation.
//!
//! # Usage
//!
//! ```rust,ignore
//! use strategy_gate::config::{load_config, resolve_config};
//!
//! // Load from an explicit path
//! let config = load_config(Some("config.yaml"))?;
//!
//! // Or from STRATEGY_GATE_CONFIG, falling back to defaults
//! let config = resolve_config()?;
//!
//! println!("HTTP port: {}", config.server.http_port);
//! ```

mod backend;
mod display;
mod observability;
mod server;

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use backend::{BackendConfig, BackendRetryConfig};
pub use display::DisplayConfig;
pub use observability::{LoggingConfig, MetricsSettings, ObservabilityConfig};
pub use server::ServerConfig;

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "STRATEGY_GATE_CONFIG";

/// Config file used when no path is given.
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

const LOG_FORMATS: [&str; 3] = ["json", "pretty", "compact"];

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Backtest service configuration.
    #[serde(default)]
    pub backend: BackendConfig,
    /// Strategy panel display configuration.
    #[serde(default)]
    pub display: DisplayConfig,
    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

// ============================================
// Configuration Loading
// ============================================

/// Load configuration from a YAML file with environment variable interpolation.
///
/// # Arguments
///
/// * `path` - Optional path to the config file. Defaults to "config.yaml".
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed, or validated.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let path = path.unwrap_or(DEFAULT_CONFIG_PATH);

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_string(),
        source: e,
    })?;

    load_config_from_string(&contents)
}

/// Load configuration from a YAML string (useful for testing).
///
/// # Errors
///
/// Returns a `ConfigError` if the YAML cannot be parsed or validated.
pub fn load_config_from_string(yaml: &str) -> Result<Config, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    if interpolated.trim().is_empty() {
        return Ok(Config::default());
    }
    let config: Config = serde_yaml_bw::from_str(&interpolated)?;
    validate_config(&config)?;
    Ok(config)
}

/// Resolve configuration for the binary.
///
/// Reads the file named by `STRATEGY_GATE_CONFIG` if set, otherwise
/// `config.yaml`. A missing default file yields the built-in defaults; a
/// missing file that was named explicitly is an error.
///
/// # Errors
///
/// Returns a `ConfigError` if the file exists but cannot be read, parsed,
/// or validated.
pub fn resolve_config() -> Result<Config, ConfigError> {
    match std::env::var(CONFIG_PATH_ENV) {
        Ok(path) if !path.trim().is_empty() => load_config(Some(path.trim())),
        _ if Path::new(DEFAULT_CONFIG_PATH).exists() => load_config(None),
        _ => Ok(Config::default()),
    }
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax.
#[allow(clippy::expect_used)] // Regex is compile-time constant
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    re.replace_all(input, |cap: &regex::Captures<'_>| {
        let default_value = cap.get(2).map_or("", |m| m.as_str());
        match std::env::var(&cap[1]) {
            Ok(v) if !v.is_empty() => v,
            _ => default_value.to_string(),
        }
    })
    .into_owned()
}

/// Validate configuration values.
fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.http_port == 0 {
        return Err(ConfigError::ValidationError(
            "server.http_port must be non-zero".to_string(),
        ));
    }

    let metrics = &config.observability.metrics;
    if metrics.enabled && metrics.port == config.server.http_port {
        return Err(ConfigError::ValidationError(
            "observability.metrics.port and server.http_port must be different".to_string(),
        ));
    }

    let base_url = config.backend.base_url.trim();
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        return Err(ConfigError::ValidationError(
            "backend.base_url must start with http:// or https://".to_string(),
        ));
    }

    if !config.backend.backtest_path.starts_with('/') {
        return Err(ConfigError::ValidationError(
            "backend.backtest_path must start with '/'".to_string(),
        ));
    }

    if config.backend.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "backend.timeout_secs must be positive".to_string(),
        ));
    }

    let retry = &config.backend.retry;
    if retry.max_attempts == 0 {
        return Err(ConfigError::ValidationError(
            "backend.retry.max_attempts must be at least 1".to_string(),
        ));
    }
    if retry.multiplier < 1.0 {
        return Err(ConfigError::ValidationError(
            "backend.retry.multiplier must be at least 1.0".to_string(),
        ));
    }
    if !(0.0..=1.0).contains(&retry.jitter_factor) {
        return Err(ConfigError::ValidationError(
            "backend.retry.jitter_factor must be between 0.0 and 1.0".to_string(),
        ));
    }

    let format = config.observability.logging.format.as_str();
    if !LOG_FORMATS.contains(&format) {
        return Err(ConfigError::ValidationError(format!(
            "observability.logging.format must be one of: {LOG_FORMATS:?}"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::strategy_form::Locale;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.server.http_port, 8080);
        assert_eq!(config.backend.backtest_path, "/api/backtest");
        assert_eq!(config.display.locale, Locale::Zh);
        assert_eq!(config.observability.logging.format, "json");
        assert!(!config.observability.metrics.enabled);
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_load_minimal_config() {
        let yaml = r"
server:
  http_port: 9000
";

        let config = match load_config_from_string(yaml) {
            Ok(c) => c,
            Err(e) => panic!("should load minimal config: {e}"),
        };
        assert_eq!(config.server.http_port, 9000);
        assert_eq!(config.backend.timeout_secs, 120);
    }

    #[test]
    fn test_empty_config_is_default() {
        let config = load_config_from_string("\n").unwrap();
        assert_eq!(config.server.http_port, 8080);
    }

    #[test]
    fn test_env_var_with_default_when_missing() {
        let input = "base_url: ${STRATEGY_GATE_TEST_NONEXISTENT_VAR:-http://localhost:5000}";
        let result = interpolate_env_vars(input);

        assert_eq!(result, "base_url: http://localhost:5000");
    }

    #[test]
    #[expect(clippy::literal_string_with_formatting_args)] // ${...} is env var syntax
    fn test_env_var_with_default_uses_existing() {
        let input = "path: ${PATH:-default}";
        let result = interpolate_env_vars(input);

        assert_ne!(result, "path: default");
        assert!(result.starts_with("path: "));
    }

    #[test]
    fn test_env_var_without_default_becomes_empty() {
        let input = "locale: ${STRATEGY_GATE_TEST_UNLIKELY_TO_EXIST}";
        assert_eq!(interpolate_env_vars(input), "locale: ");
    }

    #[test]
    fn test_validation_metrics_port_clash() {
        let yaml = r"
server:
  http_port: 9090
observability:
  metrics:
    enabled: true
    port: 9090
";

        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for clashing ports");
        };
        assert!(err.to_string().contains("must be different"));
    }

    #[test]
    fn test_validation_bad_base_url() {
        let yaml = r"
backend:
  base_url: localhost:5000
";

        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for base_url without scheme");
        };
        assert!(err.to_string().contains("base_url"));
    }

    #[test]
    fn test_validation_zero_attempts() {
        let yaml = r"
backend:
  retry:
    max_attempts: 0
";

        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for zero attempts");
        };
        assert!(err.to_string().contains("max_attempts"));
    }

    #[test]
    fn test_validation_unknown_log_format() {
        let yaml = r"
observability:
  logging:
    format: xml
";

        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for log format");
        };
        assert!(err.to_string().contains("format"));
    }

    #[test]
    fn test_full_config_parse() {
        let yaml = r#"
server:
  http_port: 8081
  bind_address: "127.0.0.1"

backend:
  base_url: "https://backtest.internal"
  backtest_path: "/api/backtest"
  timeout_secs: 60
  retry:
    max_attempts: 5
    initial_backoff_ms: 100
    jitter_factor: 0.0

display:
  locale: en

observability:
  logging:
    level: debug
    format: pretty
  metrics:
    enabled: true
    port: 9100
"#;

        let config = load_config_from_string(yaml).unwrap();
        assert_eq!(config.server.http_addr(), "127.0.0.1:8081");
        assert_eq!(config.display.locale, Locale::En);
        assert_eq!(config.backend.retry.max_attempts, 5);
        assert_eq!(config.backend.retry.max_backoff_ms, 5_000);
        assert_eq!(config.observability.logging.level, "debug");
        assert_eq!(config.observability.metrics.port, 9100);

        let api = config.backend.to_api_config();
        assert_eq!(api.backtest_url(), "https://backtest.internal/api/backtest");
        assert_eq!(api.timeout.as_secs(), 60);
        assert_eq!(api.retry.max_attempts, 5);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "display:\n  locale: en\nserver:\n  http_port: 8181").unwrap();

        let config = load_config(file.path().to_str()).unwrap();
        assert_eq!(config.server.http_port, 8181);
        assert_eq!(config.display.locale, Locale::En);
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.yaml");

        let Err(err) = load_config(path.to_str()) else {
            panic!("expected read error");
        };
        assert!(matches!(err, ConfigError::ReadError { .. }));
    }
}
