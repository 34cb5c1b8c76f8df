//! Strategy View Port (Driven Port)
//!
//! The UI surfaces the controller drives: the strategy indicator, the
//! error banner and the loading state.

/// Port for strategy panel rendering.
pub trait StrategyViewPort: Send + Sync {
    /// Show the indicator with a strategy label.
    fn show_strategy(&self, label: &str);

    /// Hide the indicator.
    fn hide_strategy(&self);

    /// Toggle the indicator's invalid style.
    fn mark_strategy_invalid(&self, invalid: bool);

    /// Show a message on the error banner.
    fn show_error(&self, message: &str);

    /// Clear the error banner.
    fn clear_error(&self);

    /// Show a transient success notice.
    fn show_success(&self, message: &str);

    /// Toggle the loading indicator.
    fn set_loading(&self, loading: bool);
}
