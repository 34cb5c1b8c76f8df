// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::significant_drop_tightening,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::items_after_statements
    )
)]

//! Strategy Gate - Option spread classification and backtest submission gate
//!
//! Classifies up to four option delta inputs (put sell, put buy, call sell,
//! call buy) into a known strategy, validates them, and gates submission of
//! backtest requests on that validation.
//!
//! # Architecture (Clean Architecture + DDD + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: `strategy_form`
//!   - value objects: form values, input snapshot, verdict, validation result,
//!     presets, scheme parameters
//!   - services: classifier, leg validator, submission gate
//!
//! - **Application**: orchestration
//!   - `ports`: `FormPort`, `StrategyViewPort`, `BacktestPort`
//!   - `services`: `StrategyFormController`
//!   - `dto`: `BacktestRequest`
//!
//! - **Infrastructure**: adapters
//!   - `backtest_api`: reqwest client for the backtest service
//!   - `http`: axum REST API
//!   - `form`, `view`: in-memory form and panel

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

/// Domain layer - Strategy classification and validation.
pub mod domain;

/// Application layer - Controller and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

// =============================================================================
// Cross-cutting
// =============================================================================

/// Configuration loading and validation.
pub mod config;

/// Error codes and submission errors.
pub mod error;

/// Prometheus metrics.
pub mod observability;

/// Tracing subscriber setup.
pub mod telemetry;

// =============================================================================
// Re-exports
// =============================================================================

// Domain re-exports
pub use domain::strategy_form::{
    FormValues, InputSnapshot, LegField, LegViolation, Locale, SchemeParams, StrategyParams,
    StrategyPreset, StrategyVerdict, SubmissionRejection, ValidationResult, check_submission,
    classify, evaluate, validate,
};

// Application re-exports
pub use application::dto::BacktestRequest;
pub use application::ports::{BacktestError, BacktestPort, FormPort, StrategyViewPort};
pub use application::services::{FieldChangeOutcome, StrategyFormController, SubmitOutcome};

// Infrastructure re-exports
pub use infrastructure::backtest_api::{BacktestApiClient, BacktestApiConfig};
pub use infrastructure::form::InMemoryForm;
pub use infrastructure::http::{AppState, create_router};
pub use infrastructure::view::{InMemoryStrategyView, PanelState};

pub use error::{ErrorCode, SubmitError};
