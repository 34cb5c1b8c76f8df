//! Submission gate.
//!
//! Authoritative check run before a backtest request may leave the client.
//! Leg validation here is the same [`evaluate`] call the keystroke path
//! uses, so the two can never disagree for a given form.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::strategy_form::value_objects::{
    FormValues, InputSnapshot, LegViolation, StrategyVerdict,
};

use super::leg_validator::evaluate;

/// Date format accepted on the form and sent to the backend.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Why a submission was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionRejection {
    /// A leg rule is violated.
    #[error("{0}")]
    InvalidLegs(#[from] LegViolation),

    /// No strategy is configured at all.
    #[error("select at least one strategy")]
    EmptySelection,

    /// Start date is not `YYYY-MM-DD`.
    #[error("start date must be formatted as YYYY-MM-DD")]
    MalformedStartDate {
        /// Text as entered.
        raw: String,
    },

    /// End date is not `YYYY-MM-DD`.
    #[error("end date must be formatted as YYYY-MM-DD")]
    MalformedEndDate {
        /// Text as entered.
        raw: String,
    },

    /// Start date is not strictly before end date.
    #[error("end date must be later than start date")]
    InvertedDateRange {
        /// Parsed start date.
        start: NaiveDate,
        /// Parsed end date.
        end: NaiveDate,
    },

    /// Saving a scheme without naming it.
    #[error("please enter a scheme name")]
    MissingSchemeName,
}

/// Rejection category, used for metrics and HTTP mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionKind {
    /// Leg rule violated.
    InvalidLegs,
    /// Nothing selected.
    EmptySelection,
    /// Date malformed or inverted.
    DateRange,
    /// Scheme name missing.
    MissingSchemeName,
}

impl RejectionKind {
    /// Label used in metrics.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidLegs => "invalid_legs",
            Self::EmptySelection => "empty_selection",
            Self::DateRange => "date_range",
            Self::MissingSchemeName => "missing_scheme_name",
        }
    }
}

impl SubmissionRejection {
    /// Rejection category.
    #[must_use]
    pub const fn kind(&self) -> RejectionKind {
        match self {
            Self::InvalidLegs(_) => RejectionKind::InvalidLegs,
            Self::EmptySelection => RejectionKind::EmptySelection,
            Self::MalformedStartDate { .. }
            | Self::MalformedEndDate { .. }
            | Self::InvertedDateRange { .. } => RejectionKind::DateRange,
            Self::MissingSchemeName => RejectionKind::MissingSchemeName,
        }
    }
}

/// A form that passed the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovedSubmission {
    /// Parsed legs.
    pub snapshot: InputSnapshot,
    /// Recognized strategy (never `None`).
    pub verdict: StrategyVerdict,
    /// Parsed start date, if given.
    pub start_date: Option<NaiveDate>,
    /// Parsed end date, if given.
    pub end_date: Option<NaiveDate>,
    /// Scheme name when saving.
    pub scheme_name: Option<String>,
}

/// Run the submission gate over a form.
///
/// Order of checks: leg validation, non-empty selection, dates, scheme name.
pub fn check_submission(form: &FormValues) -> Result<ApprovedSubmission, SubmissionRejection> {
    let snapshot = form.snapshot();
    let (verdict, validation) = evaluate(&snapshot);
    validation.into_result()?;

    if !verdict.is_recognized() {
        return Err(SubmissionRejection::EmptySelection);
    }

    let (start_date, end_date) = check_dates(form)?;

    let scheme_name = if form.save_scheme {
        Some(
            form.scheme_name_text()
                .ok_or(SubmissionRejection::MissingSchemeName)?
                .to_string(),
        )
    } else {
        None
    };

    Ok(ApprovedSubmission {
        snapshot,
        verdict,
        start_date,
        end_date,
        scheme_name,
    })
}

fn check_dates(
    form: &FormValues,
) -> Result<(Option<NaiveDate>, Option<NaiveDate>), SubmissionRejection> {
    let start = form
        .start_date_text()
        .map(|raw| {
            NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| {
                SubmissionRejection::MalformedStartDate {
                    raw: raw.to_string(),
                }
            })
        })
        .transpose()?;
    let end = form
        .end_date_text()
        .map(|raw| {
            NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| {
                SubmissionRejection::MalformedEndDate {
                    raw: raw.to_string(),
                }
            })
        })
        .transpose()?;

    if let (Some(start), Some(end)) = (start, end) {
        if start >= end {
            return Err(SubmissionRejection::InvertedDateRange { start, end });
        }
    }

    Ok((start, end))
}
