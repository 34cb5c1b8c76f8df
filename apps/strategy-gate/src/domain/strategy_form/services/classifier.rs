//! Strategy classification.
//!
//! Maps an [`InputSnapshot`] to the strategy it describes. Rules are
//! evaluated in order and the first match wins:
//!
//! 1. Wheel: put sell exactly -0.5, call sell exactly 0.5, no buy legs
//! 2. Iron Condor: all four legs
//! 3. Naked Put: put sell only
//! 4. Bull Put Spread: both puts, no calls
//! 5. Bear Call Spread: both calls, no puts
//!
//! Anything else is [`StrategyVerdict::None`].

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::domain::strategy_form::value_objects::{InputSnapshot, StrategyVerdict};

/// Put sell delta that marks a wheel. Compared exactly.
pub const WHEEL_PUT_SELL_DELTA: Decimal = dec!(-0.5);

/// Call sell delta that marks a wheel. Compared exactly.
pub const WHEEL_CALL_SELL_DELTA: Decimal = dec!(0.5);

/// Classify a snapshot.
#[must_use]
pub fn classify(snapshot: &InputSnapshot) -> StrategyVerdict {
    if is_wheel(snapshot) {
        return StrategyVerdict::Wheel;
    }

    match (
        snapshot.put_sell_delta.is_some(),
        snapshot.put_buy_delta.is_some(),
        snapshot.call_sell_delta.is_some(),
        snapshot.call_buy_delta.is_some(),
    ) {
        (true, true, true, true) => StrategyVerdict::IronCondor,
        (true, false, false, false) => StrategyVerdict::NakedPut,
        (true, true, false, false) => StrategyVerdict::BullPutSpread,
        (false, false, true, true) => StrategyVerdict::BearCallSpread,
        _ => StrategyVerdict::None,
    }
}

fn is_wheel(snapshot: &InputSnapshot) -> bool {
    snapshot.put_sell_delta == Some(WHEEL_PUT_SELL_DELTA)
        && snapshot.put_buy_delta.is_none()
        && snapshot.call_sell_delta == Some(WHEEL_CALL_SELL_DELTA)
        && snapshot.call_buy_delta.is_none()
}
