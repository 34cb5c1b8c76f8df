//! Strategy panel display configuration.

use serde::{Deserialize, Serialize};

use crate::domain::strategy_form::Locale;

/// Display configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Locale for strategy indicator labels.
    #[serde(default)]
    pub locale: Locale,
}
