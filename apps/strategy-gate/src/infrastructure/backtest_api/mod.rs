//! Backtest service adapter.
//!
//! Posts gated requests to the remote backtest service over HTTP.

mod client;
mod config;

pub use client::BacktestApiClient;
pub use config::{BacktestApiConfig, RetryConfig};
