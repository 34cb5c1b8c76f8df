//! Leg validation result types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Category of a leg violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// A present delta lies outside its open interval.
    Range,
    /// A complete pair has its sell/buy relationship reversed.
    Ordering,
    /// Exactly one leg of a two-leg side is present.
    IncompletePair,
}

impl ViolationKind {
    /// Metric label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Range => "range",
            Self::Ordering => "ordering",
            Self::IncompletePair => "incomplete_pair",
        }
    }
}

/// A single leg rule violation. `Display` is the user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LegViolation {
    /// Put delta outside (-1, 0).
    #[error("PUT delta must be between -1 and 0")]
    PutOutOfRange,
    /// Call delta outside (0, 1).
    #[error("CALL delta must be between 0 and 1")]
    CallOutOfRange,
    /// Put spread with sell delta not below buy delta.
    #[error("in a PUT spread, sell delta must be less than buy delta")]
    PutSpreadOrder,
    /// Call spread with sell delta not above buy delta.
    #[error("in a CALL spread, sell delta must be greater than buy delta")]
    CallSpreadOrder,
    /// Only one put leg in a shape that needs both.
    #[error("PUT strategy requires both buy and sell delta")]
    PutPairIncomplete,
    /// Only one call leg in a shape that needs both.
    #[error("CALL strategy requires both buy and sell delta")]
    CallPairIncomplete,
}

impl LegViolation {
    /// Stable machine-readable code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::PutOutOfRange => "PUT_OUT_OF_RANGE",
            Self::CallOutOfRange => "CALL_OUT_OF_RANGE",
            Self::PutSpreadOrder => "PUT_SPREAD_ORDER",
            Self::CallSpreadOrder => "CALL_SPREAD_ORDER",
            Self::PutPairIncomplete => "PUT_PAIR_INCOMPLETE",
            Self::CallPairIncomplete => "CALL_PAIR_INCOMPLETE",
        }
    }

    /// Violation category.
    #[must_use]
    pub const fn kind(&self) -> ViolationKind {
        match self {
            Self::PutOutOfRange | Self::CallOutOfRange => ViolationKind::Range,
            Self::PutSpreadOrder | Self::CallSpreadOrder => ViolationKind::Ordering,
            Self::PutPairIncomplete | Self::CallPairIncomplete => ViolationKind::IncompletePair,
        }
    }
}

/// Outcome of leg validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationResult {
    /// All applicable rules hold.
    Ok,
    /// First violated rule.
    Invalid(LegViolation),
}

impl ValidationResult {
    /// Whether validation passed.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }

    /// The violation, if any.
    #[must_use]
    pub const fn violation(&self) -> Option<LegViolation> {
        match self {
            Self::Ok => None,
            Self::Invalid(violation) => Some(*violation),
        }
    }

    /// Human-readable reason, if invalid.
    #[must_use]
    pub fn reason(&self) -> Option<String> {
        self.violation().map(|violation| violation.to_string())
    }

    /// Convert into a `Result` for `?` propagation.
    pub const fn into_result(self) -> Result<(), LegViolation> {
        match self {
            Self::Ok => Ok(()),
            Self::Invalid(violation) => Err(violation),
        }
    }
}

impl From<Option<LegViolation>> for ValidationResult {
    fn from(violation: Option<LegViolation>) -> Self {
        violation.map_or(Self::Ok, Self::Invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            LegViolation::PutOutOfRange.to_string(),
            "PUT delta must be between -1 and 0"
        );
        assert_eq!(
            LegViolation::CallSpreadOrder.to_string(),
            "in a CALL spread, sell delta must be greater than buy delta"
        );
        assert_eq!(
            LegViolation::CallPairIncomplete.to_string(),
            "CALL strategy requires both buy and sell delta"
        );
    }

    #[test]
    fn kinds_and_codes() {
        assert_eq!(LegViolation::PutSpreadOrder.kind(), ViolationKind::Ordering);
        assert_eq!(LegViolation::CallOutOfRange.kind(), ViolationKind::Range);
        assert_eq!(LegViolation::PutPairIncomplete.kind().as_str(), "incomplete_pair");
        assert_eq!(LegViolation::CallSpreadOrder.code(), "CALL_SPREAD_ORDER");
    }

    #[test]
    fn result_accessors() {
        let ok = ValidationResult::Ok;
        assert!(ok.is_ok());
        assert_eq!(ok.reason(), None);
        assert_eq!(ok.into_result(), Ok(()));

        let invalid = ValidationResult::Invalid(LegViolation::PutSpreadOrder);
        assert!(!invalid.is_ok());
        assert_eq!(
            invalid.reason().as_deref(),
            Some("in a PUT spread, sell delta must be less than buy delta")
        );
        assert_eq!(invalid.into_result(), Err(LegViolation::PutSpreadOrder));
    }

    #[test]
    fn from_option() {
        assert_eq!(ValidationResult::from(None), ValidationResult::Ok);
        assert_eq!(
            ValidationResult::from(Some(LegViolation::CallOutOfRange)),
            ValidationResult::Invalid(LegViolation::CallOutOfRange)
        );
    }
}
