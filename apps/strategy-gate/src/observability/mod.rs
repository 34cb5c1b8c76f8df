//! Observability for the strategy gate.
//!
//! Prometheus metrics for field evaluation and backtest submissions.

pub mod metrics;

pub use metrics::{
    MetricsConfig, MetricsError, init_metrics, record_backend_call, record_field_change,
    record_submission,
};
