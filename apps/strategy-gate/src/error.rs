//! Error handling for the strategy gate.
//!
//! Every failure a submission can meet is recoverable and user-facing.
//! [`ErrorCode`] gives each a stable reason string and the HTTP status the
//! REST adapter answers with.
//!
//! | Code | HTTP | Usage |
//! |------|------|-------|
//! | `INVALID_LEGS` | 422 | Leg range, ordering or pairing rule violated |
//! | `EMPTY_SELECTION` | 422 | No strategy configured |
//! | `INVALID_DATE_RANGE` | 422 | Date malformed or start not before end |
//! | `MISSING_SCHEME_NAME` | 422 | Saving a scheme without a name |
//! | `BACKEND_REJECTED` | 502 | Backtest service refused the request |
//! | `BACKEND_UNAVAILABLE` | 503 | Backtest service unreachable |

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::ports::BacktestError;
use crate::domain::strategy_form::{LegViolation, RejectionKind, SubmissionRejection};

/// Error codes for the strategy gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Leg rule violated.
    InvalidLegs,
    /// Nothing selected.
    EmptySelection,
    /// Date malformed or inverted.
    InvalidDateRange,
    /// Scheme name missing.
    MissingSchemeName,
    /// Backtest service answered with an error.
    BackendRejected,
    /// Backtest service could not be reached.
    BackendUnavailable,
}

impl ErrorCode {
    /// HTTP status for this error.
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        match self {
            Self::InvalidLegs
            | Self::EmptySelection
            | Self::InvalidDateRange
            | Self::MissingSchemeName => 422,
            Self::BackendRejected => 502,
            Self::BackendUnavailable => 503,
        }
    }

    /// Reason string.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::InvalidLegs => "INVALID_LEGS",
            Self::EmptySelection => "EMPTY_SELECTION",
            Self::InvalidDateRange => "INVALID_DATE_RANGE",
            Self::MissingSchemeName => "MISSING_SCHEME_NAME",
            Self::BackendRejected => "BACKEND_REJECTED",
            Self::BackendUnavailable => "BACKEND_UNAVAILABLE",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.reason())
    }
}

/// Failure of a backtest submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// The gate refused the form. The backend was not called.
    #[error(transparent)]
    Rejected(#[from] SubmissionRejection),

    /// The backend call failed.
    #[error(transparent)]
    Backend(#[from] BacktestError),
}

impl SubmitError {
    /// Error code for this failure.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Rejected(rejection) => match rejection.kind() {
                RejectionKind::InvalidLegs => ErrorCode::InvalidLegs,
                RejectionKind::EmptySelection => ErrorCode::EmptySelection,
                RejectionKind::DateRange => ErrorCode::InvalidDateRange,
                RejectionKind::MissingSchemeName => ErrorCode::MissingSchemeName,
            },
            Self::Backend(
                BacktestError::Connection { .. } | BacktestError::MaxRetriesExceeded { .. },
            ) => ErrorCode::BackendUnavailable,
            Self::Backend(_) => ErrorCode::BackendRejected,
        }
    }

    /// Leg violation behind an `INVALID_LEGS` rejection.
    #[must_use]
    pub const fn violation(&self) -> Option<LegViolation> {
        match self {
            Self::Rejected(SubmissionRejection::InvalidLegs(violation)) => Some(*violation),
            _ => None,
        }
    }

    /// Whether the backend was never contacted.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}
