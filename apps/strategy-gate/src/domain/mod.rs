//! Domain Layer
//!
//! The innermost layer containing business logic with zero infrastructure dependencies.
//!
//! # Bounded Contexts
//!
//! - [`strategy_form`]: Strategy detection, leg validation and the submission gate
//!   for option-spread backtests

pub mod strategy_form;
