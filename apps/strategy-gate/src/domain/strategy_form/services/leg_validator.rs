//! Leg validation.
//!
//! Two layers of rules:
//!
//! - Range rules apply to every present leg regardless of strategy.
//! - Strategy checks are looked up from a per-verdict table, so adding a
//!   strategy means adding a table row.

use rust_decimal::Decimal;

use crate::domain::strategy_form::value_objects::{
    InputSnapshot, LegField, LegViolation, OptionType, StrategyVerdict, ValidationResult,
};

use super::classifier::classify;

/// A strategy-specific check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyCheck {
    /// Both put legs present, or neither, once a call leg is present.
    PutPairComplete,
    /// Put sell delta strictly below put buy delta.
    PutOrdering,
    /// Both call legs present, or neither, once a put leg is present.
    CallPairComplete,
    /// Call sell delta strictly above call buy delta.
    CallOrdering,
}

impl StrategyCheck {
    /// Run the check. Ordering checks pass vacuously unless both legs exist.
    #[must_use]
    pub fn check(self, snapshot: &InputSnapshot) -> Option<LegViolation> {
        match self {
            Self::PutPairComplete => incomplete_pair(snapshot, OptionType::Put)
                .then_some(LegViolation::PutPairIncomplete),
            Self::CallPairComplete => incomplete_pair(snapshot, OptionType::Call)
                .then_some(LegViolation::CallPairIncomplete),
            Self::PutOrdering => match (snapshot.put_sell_delta, snapshot.put_buy_delta) {
                (Some(sell), Some(buy)) if sell >= buy => Some(LegViolation::PutSpreadOrder),
                _ => None,
            },
            Self::CallOrdering => match (snapshot.call_sell_delta, snapshot.call_buy_delta) {
                (Some(sell), Some(buy)) if sell <= buy => Some(LegViolation::CallSpreadOrder),
                _ => None,
            },
        }
    }
}

/// One leg of `side` present while the other side is non-empty. A lone leg
/// is left to the submission gate as an empty selection.
fn incomplete_pair(snapshot: &InputSnapshot, side: OptionType) -> bool {
    let other = match side {
        OptionType::Put => OptionType::Call,
        OptionType::Call => OptionType::Put,
    };
    snapshot.side_count(side) == 1 && snapshot.side_count(other) > 0
}

/// Strategy checks for a verdict, in evaluation order.
#[must_use]
pub const fn checks_for(verdict: StrategyVerdict) -> &'static [StrategyCheck] {
    match verdict {
        StrategyVerdict::Wheel | StrategyVerdict::NakedPut => &[],
        StrategyVerdict::BullPutSpread => &[StrategyCheck::PutOrdering],
        StrategyVerdict::BearCallSpread => &[StrategyCheck::CallOrdering],
        StrategyVerdict::IronCondor => &[StrategyCheck::PutOrdering, StrategyCheck::CallOrdering],
        StrategyVerdict::None => &[
            StrategyCheck::PutPairComplete,
            StrategyCheck::PutOrdering,
            StrategyCheck::CallPairComplete,
            StrategyCheck::CallOrdering,
        ],
    }
}

/// Whether a delta lies inside the open interval for its side.
#[must_use]
pub fn in_range(option_type: OptionType, delta: Decimal) -> bool {
    match option_type {
        OptionType::Put => delta > Decimal::NEGATIVE_ONE && delta < Decimal::ZERO,
        OptionType::Call => delta > Decimal::ZERO && delta < Decimal::ONE,
    }
}

fn range_violation(field: LegField) -> LegViolation {
    match field.option_type() {
        OptionType::Put => LegViolation::PutOutOfRange,
        OptionType::Call => LegViolation::CallOutOfRange,
    }
}

/// Validate a snapshot against the rules for its verdict.
///
/// Returns the first violation found. An empty snapshot is always valid.
#[must_use]
pub fn validate(snapshot: &InputSnapshot, verdict: StrategyVerdict) -> ValidationResult {
    if snapshot.is_empty() {
        return ValidationResult::Ok;
    }

    let out_of_range = snapshot
        .present_legs()
        .find(|(field, delta)| !in_range(field.option_type(), *delta))
        .map(|(field, _)| range_violation(field));
    if let Some(violation) = out_of_range {
        return ValidationResult::Invalid(violation);
    }

    checks_for(verdict)
        .iter()
        .find_map(|check| check.check(snapshot))
        .into()
}

/// Classify then validate. Every caller that gates on validity goes
/// through here so keystroke and submit paths agree.
#[must_use]
pub fn evaluate(snapshot: &InputSnapshot) -> (StrategyVerdict, ValidationResult) {
    let verdict = classify(snapshot);
    (verdict, validate(snapshot, verdict))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use test_case::test_case;

    fn put_sell(value: Decimal) -> InputSnapshot {
        InputSnapshot::default().with(LegField::PutSell, Some(value))
    }

    #[test_case(dec!(-1) ; "lower bound")]
    #[test_case(dec!(0) ; "upper bound")]
    #[test_case(dec!(-1.5) ; "below")]
    #[test_case(dec!(0.2) ; "positive")]
    fn put_range_rejected(value: Decimal) {
        let (_, result) = evaluate(&put_sell(value));
        assert_eq!(result, ValidationResult::Invalid(LegViolation::PutOutOfRange));
    }

    #[test_case(dec!(-0.5) ; "mid")]
    #[test_case(dec!(-0.999) ; "near lower")]
    #[test_case(dec!(-0.001) ; "near upper")]
    fn put_range_accepted(value: Decimal) {
        let (verdict, result) = evaluate(&put_sell(value));
        assert_eq!(verdict, StrategyVerdict::NakedPut);
        assert_eq!(result, ValidationResult::Ok);
    }

    #[test_case(dec!(0) ; "lower bound")]
    #[test_case(dec!(1) ; "upper bound")]
    #[test_case(dec!(-0.2) ; "negative")]
    fn call_range_rejected(value: Decimal) {
        let snapshot = InputSnapshot::new(None, None, Some(value), Some(dec!(0.1)));
        assert_eq!(
            validate(&snapshot, classify(&snapshot)),
            ValidationResult::Invalid(LegViolation::CallOutOfRange)
        );
    }

    #[test]
    fn put_ordering_boundary() {
        let equal = InputSnapshot::new(Some(dec!(-0.3)), Some(dec!(-0.3)), None, None);
        assert_eq!(
            evaluate(&equal),
            (
                StrategyVerdict::BullPutSpread,
                ValidationResult::Invalid(LegViolation::PutSpreadOrder)
            )
        );

        let ordered = InputSnapshot::new(Some(dec!(-0.3)), Some(dec!(-0.2)), None, None);
        assert_eq!(
            evaluate(&ordered),
            (StrategyVerdict::BullPutSpread, ValidationResult::Ok)
        );
    }

    #[test]
    fn bear_call_wrong_order() {
        let snapshot = InputSnapshot::new(None, None, Some(dec!(0.2)), Some(dec!(0.3)));
        let (verdict, result) = evaluate(&snapshot);
        assert_eq!(verdict, StrategyVerdict::BearCallSpread);
        assert_eq!(
            result.reason().as_deref(),
            Some("in a CALL spread, sell delta must be greater than buy delta")
        );
    }

    #[test]
    fn iron_condor_happy_path() {
        let snapshot = InputSnapshot::new(
            Some(dec!(-0.3)),
            Some(dec!(-0.15)),
            Some(dec!(0.3)),
            Some(dec!(0.15)),
        );
        assert_eq!(
            evaluate(&snapshot),
            (StrategyVerdict::IronCondor, ValidationResult::Ok)
        );
    }

    #[test]
    fn iron_condor_checks_puts_before_calls() {
        let snapshot = InputSnapshot::new(
            Some(dec!(-0.1)),
            Some(dec!(-0.2)),
            Some(dec!(0.1)),
            Some(dec!(0.2)),
        );
        assert_eq!(
            evaluate(&snapshot).1,
            ValidationResult::Invalid(LegViolation::PutSpreadOrder)
        );
    }

    #[test]
    fn wheel_is_valid() {
        let snapshot = InputSnapshot::new(Some(dec!(-0.5)), None, Some(dec!(0.5)), None);
        assert_eq!(
            evaluate(&snapshot),
            (StrategyVerdict::Wheel, ValidationResult::Ok)
        );
    }

    #[test]
    fn empty_snapshot_is_ok() {
        assert_eq!(
            evaluate(&InputSnapshot::default()),
            (StrategyVerdict::None, ValidationResult::Ok)
        );
    }

    #[test]
    fn partial_put_with_call_leg() {
        let snapshot = InputSnapshot::new(Some(dec!(-0.3)), None, Some(dec!(0.3)), None);
        assert_eq!(
            evaluate(&snapshot).1,
            ValidationResult::Invalid(LegViolation::PutPairIncomplete)
        );
    }

    #[test]
    fn partial_call_with_put_pair() {
        let snapshot = InputSnapshot::new(Some(dec!(-0.3)), Some(dec!(-0.2)), None, Some(dec!(0.2)));
        assert_eq!(
            evaluate(&snapshot).1,
            ValidationResult::Invalid(LegViolation::CallPairIncomplete)
        );
    }

    #[test_case(InputSnapshot::new(None, None, None, Some(dec!(0.2))) ; "call buy")]
    #[test_case(InputSnapshot::new(None, None, Some(dec!(0.3)), None) ; "call sell")]
    #[test_case(InputSnapshot::new(None, Some(dec!(-0.2)), None, None) ; "put buy")]
    fn lone_leg_is_unclassified_but_valid(snapshot: InputSnapshot) {
        assert_eq!(
            evaluate(&snapshot),
            (StrategyVerdict::None, ValidationResult::Ok)
        );
    }

    #[test]
    fn lone_leg_still_range_checked() {
        let snapshot = InputSnapshot::new(None, None, Some(dec!(1.2)), None);
        assert_eq!(
            evaluate(&snapshot).1,
            ValidationResult::Invalid(LegViolation::CallOutOfRange)
        );
    }

    #[test]
    fn partial_call_with_lone_put_buy() {
        let snapshot = InputSnapshot::new(None, Some(dec!(-0.2)), Some(dec!(0.3)), None);
        assert_eq!(
            evaluate(&snapshot).1,
            ValidationResult::Invalid(LegViolation::PutPairIncomplete)
        );
    }

    #[test]
    fn range_checked_before_structure() {
        let snapshot = InputSnapshot::new(None, Some(dec!(-2)), None, None);
        assert_eq!(
            evaluate(&snapshot).1,
            ValidationResult::Invalid(LegViolation::PutOutOfRange)
        );
    }

    #[test]
    fn every_recognized_verdict_has_no_pair_checks() {
        for verdict in [
            StrategyVerdict::NakedPut,
            StrategyVerdict::BullPutSpread,
            StrategyVerdict::BearCallSpread,
            StrategyVerdict::IronCondor,
            StrategyVerdict::Wheel,
        ] {
            assert!(!checks_for(verdict).contains(&StrategyCheck::PutPairComplete));
            assert!(!checks_for(verdict).contains(&StrategyCheck::CallPairComplete));
        }
    }
}
