//! Prometheus metrics for the strategy gate.
//!
//! # Example
//!
//! ```ignore
//! use strategy_gate::observability::{init_metrics, MetricsConfig};
//!
//! init_metrics(&MetricsConfig::default())?;
//! record_field_change("iron_condor", None);
//! record_field_change("none", Some("incomplete_pair"));
//! ```

use std::net::SocketAddr;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Configuration for the metrics exporter.
#[derive(Debug, Clone)]
pub struct MetricsConfig {
    /// Address to bind the metrics HTTP listener.
    pub listen_addr: SocketAddr,
    /// Histogram buckets for backend latency (in seconds).
    pub latency_buckets: Vec<f64>,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 9090)),
            // 10ms to 60s; backtests are slow
            latency_buckets: vec![0.01, 0.05, 0.1, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0],
        }
    }
}

impl MetricsConfig {
    /// Create a metrics configuration with a custom address.
    #[must_use]
    pub fn with_addr(addr: SocketAddr) -> Self {
        Self {
            listen_addr: addr,
            ..Default::default()
        }
    }
}

/// Initialize the Prometheus metrics exporter.
///
/// Starts an HTTP server that exposes metrics at `/metrics`.
///
/// # Errors
///
/// Returns an error if the exporter fails to start (e.g. port already in use).
pub fn init_metrics(config: &MetricsConfig) -> Result<(), MetricsError> {
    PrometheusBuilder::new()
        .with_http_listener(config.listen_addr)
        .set_buckets(&config.latency_buckets)
        .map_err(|e| MetricsError::Configuration(e.to_string()))?
        .install()
        .map_err(|e| MetricsError::Installation(e.to_string()))?;

    tracing::info!(
        addr = %config.listen_addr,
        "Prometheus metrics exporter started"
    );

    Ok(())
}

/// Error type for metrics operations.
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    /// Failed to configure metrics exporter.
    #[error("metrics configuration error: {0}")]
    Configuration(String),
    /// Failed to install metrics exporter.
    #[error("metrics installation error: {0}")]
    Installation(String),
}

/// Record one evaluation of the form after a field change.
///
/// # Arguments
///
/// * `verdict` - Strategy wire name, or `"none"`
/// * `violation` - Violation category (`"range"`, `"ordering"`,
///   `"incomplete_pair"`), or `None` when the legs are valid
pub fn record_field_change(verdict: &str, violation: Option<&str>) {
    counter!(
        "strategy_gate_field_changes_total",
        "verdict" => verdict.to_string(),
        "violation" => violation.unwrap_or("none").to_string()
    )
    .increment(1);
}

/// Record the outcome of a submission attempt.
///
/// # Arguments
///
/// * `outcome` - `"accepted"`, `"backend_error"`, or a rejection kind
///   (e.g. `"invalid_legs"`, `"date_range"`)
pub fn record_submission(outcome: &str) {
    counter!(
        "strategy_gate_submissions_total",
        "outcome" => outcome.to_string()
    )
    .increment(1);
}

/// Record a call to the backtest service.
///
/// # Arguments
///
/// * `status` - `"ok"` or `"error"`
/// * `latency_seconds` - Round-trip time including retries
pub fn record_backend_call(status: &str, latency_seconds: f64) {
    counter!(
        "strategy_gate_backend_calls_total",
        "status" => status.to_string()
    )
    .increment(1);

    histogram!("strategy_gate_backend_latency_seconds").record(latency_seconds);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = MetricsConfig::default();
        assert_eq!(config.listen_addr.port(), 9090);
        assert!(config.latency_buckets.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn recording_without_exporter_is_noop() {
        record_field_change("iron_condor", None);
        record_field_change("none", Some("incomplete_pair"));
        record_submission("accepted");
        record_backend_call("ok", 0.2);
    }
}
