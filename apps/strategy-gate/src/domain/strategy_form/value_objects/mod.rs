//! Strategy form value objects.

mod form_values;
mod leg;
mod preset;
mod scheme_params;
mod snapshot;
mod strategy_params;
mod validation;
mod verdict;

pub use form_values::FormValues;
pub use leg::{LegField, OptionType};
pub use preset::StrategyPreset;
pub use scheme_params::{SchemeParams, default_scheme_name};
pub use snapshot::{InputSnapshot, parse_delta};
pub use strategy_params::StrategyParams;
pub use validation::{LegViolation, ValidationResult, ViolationKind};
pub use verdict::{Locale, StrategyVerdict};
