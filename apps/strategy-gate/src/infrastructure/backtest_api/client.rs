//! HTTP client for the backtest service with retry logic.

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::application::dto::BacktestRequest;
use crate::application::ports::{BacktestError, BacktestPort};

use super::config::{BacktestApiConfig, RetryConfig};

/// Error body the service sends with a failing status.
#[derive(Debug, Deserialize)]
struct ServiceErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// HTTP client for the backtest service.
#[derive(Debug, Clone)]
pub struct BacktestApiClient {
    client: Client,
    url: String,
    retry_config: RetryConfig,
}

impl BacktestApiClient {
    /// Create a new client from config.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is empty or the HTTP client cannot
    /// be built.
    pub fn new(config: &BacktestApiConfig) -> Result<Self, BacktestError> {
        if config.base_url.is_empty() {
            return Err(BacktestError::Connection {
                message: "backtest service base URL is empty".to_string(),
            });
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| BacktestError::Connection {
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            url: config.backtest_url(),
            retry_config: config.retry.clone(),
        })
    }

    /// Endpoint URL requests are posted to.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    async fn post(&self, request: &BacktestRequest) -> Result<serde_json::Value, BacktestError> {
        let mut backoff = ExponentialBackoff::new(&self.retry_config);

        loop {
            let response = match self.client.post(&self.url).json(request).send().await {
                Ok(resp) => resp,
                Err(e) => {
                    if let Some(delay) = backoff.next_backoff() {
                        tracing::warn!(
                            error = %e,
                            delay_ms = delay.as_millis(),
                            attempt = backoff.attempt,
                            "Network error, retrying"
                        );
                        tokio::time::sleep(delay).await;
                        continue;
                    }
                    return Err(BacktestError::Connection {
                        message: e.to_string(),
                    });
                }
            };

            let status = response.status();

            if status.is_success() {
                let text = response
                    .text()
                    .await
                    .map_err(|e| BacktestError::Connection {
                        message: e.to_string(),
                    })?;
                return parse_success_body(&text);
            }

            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok());

            let error_body = response.text().await.unwrap_or_default();
            let message = error_message(status, &error_body);

            match categorize_status(status) {
                ErrorCategory::RateLimited => {
                    let delay = backoff
                        .next_backoff()
                        .map(|d| retry_after.map_or(d, Duration::from_secs));
                    if let Some(delay) = delay {
                        tracing::warn!(delay_ms = delay.as_millis(), "Rate limited, retrying");
                        tokio::time::sleep(delay).await;
                        continue;
                    }
                    return Err(BacktestError::MaxRetriesExceeded {
                        attempts: backoff.attempt,
                    });
                }
                ErrorCategory::Retryable => {
                    if let Some(delay) = backoff.next_backoff() {
                        tracing::warn!(
                            status = status.as_u16(),
                            message = %message,
                            delay_ms = delay.as_millis(),
                            "Retryable error, retrying"
                        );
                        tokio::time::sleep(delay).await;
                        continue;
                    }
                    return Err(BacktestError::Rejected {
                        status: status.as_u16(),
                        message,
                    });
                }
                ErrorCategory::NonRetryable => {
                    return Err(BacktestError::Rejected {
                        status: status.as_u16(),
                        message,
                    });
                }
            }
        }
    }
}

#[async_trait]
impl BacktestPort for BacktestApiClient {
    async fn run_backtest(
        &self,
        request: &BacktestRequest,
    ) -> Result<serde_json::Value, BacktestError> {
        tracing::debug!(url = %self.url, etf_code = %request.etf_code, "Posting backtest request");
        self.post(request).await
    }
}

/// Decode a 2xx body. A top-level `error` key means the service refused
/// the run despite the status.
fn parse_success_body(text: &str) -> Result<serde_json::Value, BacktestError> {
    if text.trim().is_empty() {
        return Ok(serde_json::Value::Null);
    }

    let body: serde_json::Value =
        serde_json::from_str(text).map_err(|e| BacktestError::InvalidResponse {
            message: e.to_string(),
        })?;

    match body.get("error") {
        None | Some(serde_json::Value::Null) => Ok(body),
        Some(serde_json::Value::String(message)) => Err(BacktestError::Reported {
            message: message.clone(),
        }),
        Some(other) => Err(BacktestError::Reported {
            message: other.to_string(),
        }),
    }
}

/// User-facing message for a failing status: the body's `message`, then
/// its `error`, then a generic status line.
fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ServiceErrorBody>(body)
        .ok()
        .and_then(|err| err.message.or(err.error))
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| format!("request failed: {}", status.as_u16()))
}

/// Error category for determining retry behavior.
enum ErrorCategory {
    RateLimited,
    Retryable,
    NonRetryable,
}

/// Categorize HTTP status code for retry handling.
const fn categorize_status(status: StatusCode) -> ErrorCategory {
    match status.as_u16() {
        429 => ErrorCategory::RateLimited,
        408 | 500 | 502 | 503 | 504 => ErrorCategory::Retryable,
        _ => ErrorCategory::NonRetryable,
    }
}

/// Exponential backoff calculator with jitter.
struct ExponentialBackoff {
    attempt: u32,
    max_attempts: u32,
    current_backoff: Duration,
    max_backoff: Duration,
    multiplier: f64,
    jitter_factor: f64,
}

impl ExponentialBackoff {
    const fn new(config: &RetryConfig) -> Self {
        Self {
            attempt: 1,
            max_attempts: config.max_attempts,
            current_backoff: config.initial_backoff,
            max_backoff: config.max_backoff,
            multiplier: config.multiplier,
            jitter_factor: config.jitter_factor,
        }
    }

    /// Delay before the next attempt, or `None` once attempts are spent.
    fn next_backoff(&mut self) -> Option<Duration> {
        if self.attempt >= self.max_attempts {
            return None;
        }
        self.attempt += 1;

        let backoff = self.current_backoff;
        self.current_backoff = Duration::from_secs_f64(
            (self.current_backoff.as_secs_f64() * self.multiplier)
                .min(self.max_backoff.as_secs_f64()),
        );

        Some(self.apply_jitter(backoff))
    }

    fn apply_jitter(&self, duration: Duration) -> Duration {
        if self.jitter_factor <= 0.0 {
            return duration;
        }

        let base = duration.as_secs_f64();
        let range = base * self.jitter_factor;
        let jitter: f64 = rand::rng().random_range(-range..=range);
        Duration::from_secs_f64((base + jitter).max(0.0))
    }
}
