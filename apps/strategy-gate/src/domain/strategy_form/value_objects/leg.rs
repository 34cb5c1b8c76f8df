//! Leg Value Objects

use serde::{Deserialize, Serialize};
use std::fmt;

/// Option type of a leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OptionType {
    /// Put option.
    Put,
    /// Call option.
    Call,
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Put => write!(f, "PUT"),
            Self::Call => write!(f, "CALL"),
        }
    }
}

/// One of the four delta inputs on the strategy form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LegField {
    /// Sold put delta.
    #[serde(rename = "put_sell_delta")]
    PutSell,
    /// Bought put delta.
    #[serde(rename = "put_buy_delta")]
    PutBuy,
    /// Sold call delta.
    #[serde(rename = "call_sell_delta")]
    CallSell,
    /// Bought call delta.
    #[serde(rename = "call_buy_delta")]
    CallBuy,
}

impl LegField {
    /// All fields in form order.
    pub const ALL: [Self; 4] = [Self::PutSell, Self::PutBuy, Self::CallSell, Self::CallBuy];

    /// Form field / wire key for this leg.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::PutSell => "put_sell_delta",
            Self::PutBuy => "put_buy_delta",
            Self::CallSell => "call_sell_delta",
            Self::CallBuy => "call_buy_delta",
        }
    }

    /// Look a field up by its form key.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.key() == key)
    }

    /// Option type of the leg.
    #[must_use]
    pub const fn option_type(&self) -> OptionType {
        match self {
            Self::PutSell | Self::PutBuy => OptionType::Put,
            Self::CallSell | Self::CallBuy => OptionType::Call,
        }
    }
}

impl fmt::Display for LegField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip() {
        for field in LegField::ALL {
            assert_eq!(LegField::from_key(field.key()), Some(field));
        }
        assert_eq!(LegField::from_key("strike"), None);
    }

    #[test]
    fn field_sides() {
        assert_eq!(LegField::PutBuy.option_type(), OptionType::Put);
        assert_eq!(LegField::CallSell.option_type(), OptionType::Call);
    }

    #[test]
    fn field_serde_uses_form_key() {
        let json = serde_json::to_string(&LegField::CallBuy).unwrap();
        assert_eq!(json, "\"call_buy_delta\"");
    }
}
