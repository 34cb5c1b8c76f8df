//! Application Services
//!
//! Long-lived services that coordinate ports and domain logic.

mod strategy_form_controller;

pub use strategy_form_controller::{
    FieldChangeOutcome, SCHEME_SAVED_NOTICE, StrategyFormController, SubmitOutcome,
};
