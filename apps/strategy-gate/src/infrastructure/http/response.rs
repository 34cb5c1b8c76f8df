//! HTTP response DTOs.

use serde::{Deserialize, Serialize};

use crate::application::FieldChangeOutcome;
use crate::domain::strategy_form::FormValues;
use crate::error::ErrorCode;
use crate::infrastructure::view::PanelState;

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
}

/// Strategy panel after evaluating a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelResponse {
    /// Detected strategy wire name, absent when none.
    pub strategy: Option<String>,
    /// Indicator label, absent when hidden.
    pub label: Option<String>,
    /// Whether the indicator is shown.
    pub indicator_visible: bool,
    /// Whether the indicator has the invalid style.
    pub indicator_invalid: bool,
    /// Error banner text.
    pub error: Option<String>,
}

impl PanelResponse {
    /// Build from a controller outcome and the painted panel.
    #[must_use]
    pub fn new(outcome: &FieldChangeOutcome, panel: &PanelState) -> Self {
        Self {
            strategy: outcome.verdict.wire_name().map(str::to_string),
            label: panel.indicator_label.clone(),
            indicator_visible: panel.indicator_visible(),
            indicator_invalid: panel.indicator_invalid,
            error: panel.error.clone(),
        }
    }
}

/// Form rewritten by a preset or scheme, with its panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormUpdateResponse {
    /// Updated form.
    pub form: FormValues,
    /// Panel for the updated form.
    pub panel: PanelResponse,
}

/// Suggested scheme name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemeNameResponse {
    /// Generated name.
    pub name: String,
}

/// Failed submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitErrorResponse {
    /// Always false.
    pub ok: bool,
    /// Error code.
    pub code: ErrorCode,
    /// Message shown on the error banner.
    pub message: String,
    /// Leg rule code for `INVALID_LEGS`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub violation: Option<String>,
}
