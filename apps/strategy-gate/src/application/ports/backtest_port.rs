//! Backtest Port (Driven Port)
//!
//! Interface to the remote backtest service. Only requests that passed the
//! submission gate ever reach it.

use async_trait::async_trait;

use crate::application::dto::BacktestRequest;

/// Backtest service error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BacktestError {
    /// Service answered with an error status.
    #[error("{message}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Message from the response body, or a generic status message.
        message: String,
    },

    /// Service answered successfully but reported an error in the body.
    #[error("{message}")]
    Reported {
        /// Reported error.
        message: String,
    },

    /// Network failure.
    #[error("request failed: {message}")]
    Connection {
        /// Underlying error.
        message: String,
    },

    /// Body could not be decoded.
    #[error("invalid backtest response: {message}")]
    InvalidResponse {
        /// Decode error.
        message: String,
    },

    /// Retries exhausted on transient failures.
    #[error("request failed after {attempts} attempts")]
    MaxRetriesExceeded {
        /// Attempts made.
        attempts: u32,
    },
}

/// Port for running backtests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BacktestPort: Send + Sync {
    /// Run a backtest and return the service's JSON result.
    async fn run_backtest(
        &self,
        request: &BacktestRequest,
    ) -> Result<serde_json::Value, BacktestError>;
}
