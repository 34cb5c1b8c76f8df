//! In-memory strategy panel.
//!
//! Records what the controller painted so the HTTP layer can return it
//! and tests can assert on it.

use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use crate::application::ports::StrategyViewPort;

/// Last painted state of the strategy panel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelState {
    /// Indicator label, `None` when hidden.
    pub indicator_label: Option<String>,
    /// Indicator drawn with the invalid style.
    pub indicator_invalid: bool,
    /// Error banner text, `None` when cleared.
    pub error: Option<String>,
    /// Last success notice.
    pub success: Option<String>,
    /// Loading indicator shown.
    pub loading: bool,
}

impl PanelState {
    /// Whether the indicator is shown.
    #[must_use]
    pub const fn indicator_visible(&self) -> bool {
        self.indicator_label.is_some()
    }
}

/// In-memory implementation of `StrategyViewPort`.
#[derive(Debug, Default)]
pub struct InMemoryStrategyView {
    state: Mutex<PanelState>,
}

impl InMemoryStrategyView {
    /// Create a blank panel.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current panel state.
    #[must_use]
    pub fn state(&self) -> PanelState {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, PanelState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl StrategyViewPort for InMemoryStrategyView {
    fn show_strategy(&self, label: &str) {
        self.lock().indicator_label = Some(label.to_string());
    }

    fn hide_strategy(&self) {
        self.lock().indicator_label = None;
    }

    fn mark_strategy_invalid(&self, invalid: bool) {
        self.lock().indicator_invalid = invalid;
    }

    fn show_error(&self, message: &str) {
        self.lock().error = Some(message.to_string());
    }

    fn clear_error(&self) {
        self.lock().error = None;
    }

    fn show_success(&self, message: &str) {
        self.lock().success = Some(message.to_string());
    }

    fn set_loading(&self, loading: bool) {
        self.lock().loading = loading;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_painting() {
        let view = InMemoryStrategyView::new();
        view.show_strategy("Iron Condor");
        view.mark_strategy_invalid(true);
        view.show_error("CALL delta must be between 0 and 1");

        let state = view.state();
        assert!(state.indicator_visible());
        assert!(state.indicator_invalid);
        assert_eq!(state.error.as_deref(), Some("CALL delta must be between 0 and 1"));

        view.hide_strategy();
        view.clear_error();
        let state = view.state();
        assert!(!state.indicator_visible());
        assert_eq!(state.error, None);
    }
}
