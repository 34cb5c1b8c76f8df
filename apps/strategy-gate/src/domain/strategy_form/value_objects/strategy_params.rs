//! Strategy parameters as carried on the wire.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::snapshot::InputSnapshot;

/// Delta parameters of a backtest request or saved scheme.
///
/// Absent legs are omitted from JSON, never sent as `null`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyParams {
    /// Sold put delta.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub put_sell_delta: Option<Decimal>,
    /// Bought put delta.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub put_buy_delta: Option<Decimal>,
    /// Sold call delta.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_sell_delta: Option<Decimal>,
    /// Bought call delta.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_buy_delta: Option<Decimal>,
}

impl From<&InputSnapshot> for StrategyParams {
    fn from(snapshot: &InputSnapshot) -> Self {
        Self {
            put_sell_delta: snapshot.put_sell_delta,
            put_buy_delta: snapshot.put_buy_delta,
            call_sell_delta: snapshot.call_sell_delta,
            call_buy_delta: snapshot.call_buy_delta,
        }
    }
}

impl From<StrategyParams> for InputSnapshot {
    fn from(params: StrategyParams) -> Self {
        Self::new(
            params.put_sell_delta,
            params.put_buy_delta,
            params.call_sell_delta,
            params.call_buy_delta,
        )
    }
}
