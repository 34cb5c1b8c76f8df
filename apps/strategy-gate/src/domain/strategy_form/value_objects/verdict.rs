//! Strategy Verdict Value Object

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Display language for strategy labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Chinese label with the English name in parentheses.
    #[default]
    Zh,
    /// English only.
    En,
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "zh" | "zh-cn" | "zh_cn" => Ok(Self::Zh),
            "en" | "en-us" | "en_us" => Ok(Self::En),
            other => Err(format!("unsupported locale: {other}")),
        }
    }
}

/// Strategy the current delta inputs describe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyVerdict {
    /// No complete strategy recognized yet.
    #[default]
    None,
    /// Single sold put.
    NakedPut,
    /// Sold put plus protective bought put.
    #[serde(rename = "bullish_put")]
    BullPutSpread,
    /// Sold call plus protective bought call.
    #[serde(rename = "bearish_call")]
    BearCallSpread,
    /// Bull put spread plus bear call spread.
    IronCondor,
    /// Canonical -0.5 put / 0.5 call wheel.
    Wheel,
}

impl StrategyVerdict {
    /// Whether a strategy was recognized.
    #[must_use]
    pub const fn is_recognized(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// Wire name sent to the backtest service, `None` for no strategy.
    #[must_use]
    pub const fn wire_name(&self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::NakedPut => Some("naked_put"),
            Self::BullPutSpread => Some("bullish_put"),
            Self::BearCallSpread => Some("bearish_call"),
            Self::IronCondor => Some("iron_condor"),
            Self::Wheel => Some("wheel"),
        }
    }

    /// Indicator label. `None` hides the indicator.
    #[must_use]
    pub const fn label(&self, locale: Locale) -> Option<&'static str> {
        match (self, locale) {
            (Self::None, _) => None,
            (Self::NakedPut, Locale::Zh) => Some("单腿卖出看跌策略 (Naked Put)"),
            (Self::NakedPut, Locale::En) => Some("Naked Put"),
            (Self::BullPutSpread, Locale::Zh) => Some("牛市看跌策略 (Bull Put Spread)"),
            (Self::BullPutSpread, Locale::En) => Some("Bull Put Spread"),
            (Self::BearCallSpread, Locale::Zh) => Some("熊市看涨策略 (Bear Call Spread)"),
            (Self::BearCallSpread, Locale::En) => Some("Bear Call Spread"),
            (Self::IronCondor, Locale::Zh) => Some("铁鹰策略 (Iron Condor)"),
            (Self::IronCondor, Locale::En) => Some("Iron Condor"),
            (Self::Wheel, Locale::Zh) => Some("轮转型期权策略 (Wheel Strategy)"),
            (Self::Wheel, Locale::En) => Some("Wheel Strategy"),
        }
    }

    /// Number of legs the strategy uses.
    #[must_use]
    pub const fn leg_count(&self) -> usize {
        match self {
            Self::None => 0,
            Self::NakedPut => 1,
            Self::BullPutSpread | Self::BearCallSpread | Self::Wheel => 2,
            Self::IronCondor => 4,
        }
    }
}

impl fmt::Display for StrategyVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name().unwrap_or("none"))
    }
}
