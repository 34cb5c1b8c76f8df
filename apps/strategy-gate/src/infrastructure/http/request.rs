//! HTTP request DTOs.

use serde::{Deserialize, Serialize};

use crate::domain::strategy_form::{FormValues, SchemeParams, StrategyPreset};

/// Request to apply a quick-setup preset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresetRequest {
    /// Preset to apply.
    pub preset: StrategyPreset,
    /// Current form; defaults to an empty form.
    #[serde(default)]
    pub form: FormValues,
}

/// Request to fill a form from saved scheme parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FillSchemeRequest {
    /// Saved parameters.
    pub params: SchemeParams,
    /// Current form; non-scheme fields are kept.
    #[serde(default)]
    pub form: FormValues,
}
