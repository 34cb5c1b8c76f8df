//! Backtest service configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::infrastructure::backtest_api::{BacktestApiConfig, RetryConfig};

/// Backtest service connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Service base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Path of the backtest endpoint.
    #[serde(default = "default_backtest_path")]
    pub backtest_path: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Retry policy.
    #[serde(default)]
    pub retry: BackendRetryConfig,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            backtest_path: default_backtest_path(),
            timeout_secs: default_timeout_secs(),
            retry: BackendRetryConfig::default(),
        }
    }
}

impl BackendConfig {
    /// Adapter configuration for the backtest client.
    #[must_use]
    pub fn to_api_config(&self) -> BacktestApiConfig {
        BacktestApiConfig::new(self.base_url.clone())
            .with_path(self.backtest_path.clone())
            .with_timeout(Duration::from_secs(self.timeout_secs))
            .with_retry(RetryConfig {
                max_attempts: self.retry.max_attempts,
                initial_backoff: Duration::from_millis(self.retry.initial_backoff_ms),
                max_backoff: Duration::from_millis(self.retry.max_backoff_ms),
                multiplier: self.retry.multiplier,
                jitter_factor: self.retry.jitter_factor,
            })
    }
}

/// Retry settings for backtest calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendRetryConfig {
    /// Attempts including the first.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// First delay in milliseconds.
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,
    /// Delay cap in milliseconds.
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,
    /// Delay growth per attempt.
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,
    /// Jitter as a fraction of the delay.
    #[serde(default = "default_jitter_factor")]
    pub jitter_factor: f64,
}

impl Default for BackendRetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_backoff_ms: default_initial_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
            multiplier: default_multiplier(),
            jitter_factor: default_jitter_factor(),
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_backtest_path() -> String {
    "/api/backtest".to_string()
}

const fn default_timeout_secs() -> u64 {
    120
}

const fn default_max_attempts() -> u32 {
    3
}

const fn default_initial_backoff_ms() -> u64 {
    200
}

const fn default_max_backoff_ms() -> u64 {
    5_000
}

const fn default_multiplier() -> f64 {
    2.0
}

const fn default_jitter_factor() -> f64 {
    0.1
}
