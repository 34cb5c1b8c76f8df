//! Quick-setup presets for common strategies.

use serde::{Deserialize, Serialize};

use super::form_values::FormValues;
use super::leg::LegField;

/// One-click strategy setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyPreset {
    /// -0.5 put / 0.5 call, no protective legs.
    Wheel,
    /// -0.5 / -0.2 puts, 0.5 / 0.2 calls.
    IronCondor,
}

impl StrategyPreset {
    /// Leg text the preset writes, in form order. `None` clears the field.
    #[must_use]
    pub const fn legs(&self) -> [(LegField, Option<&'static str>); 4] {
        match self {
            Self::Wheel => [
                (LegField::PutSell, Some("-0.5")),
                (LegField::PutBuy, None),
                (LegField::CallSell, Some("0.5")),
                (LegField::CallBuy, None),
            ],
            Self::IronCondor => [
                (LegField::PutSell, Some("-0.5")),
                (LegField::PutBuy, Some("-0.2")),
                (LegField::CallSell, Some("0.5")),
                (LegField::CallBuy, Some("0.2")),
            ],
        }
    }

    /// Write the preset into a form. Non-leg fields are untouched.
    pub fn apply(&self, form: &mut FormValues) {
        for (field, raw) in self.legs() {
            form.set_leg(field, raw.map(str::to_string));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wheel_clears_buy_legs() {
        let mut form = FormValues::for_etf("510300")
            .with_leg(LegField::PutBuy, "-0.1")
            .with_leg(LegField::CallBuy, "0.1");
        StrategyPreset::Wheel.apply(&mut form);

        assert_eq!(form.leg(LegField::PutSell), Some("-0.5"));
        assert_eq!(form.leg(LegField::PutBuy), None);
        assert_eq!(form.leg(LegField::CallSell), Some("0.5"));
        assert_eq!(form.leg(LegField::CallBuy), None);
        assert_eq!(form.etf_code, "510300");
    }

    #[test]
    fn iron_condor_sets_all_legs() {
        let mut form = FormValues::default();
        StrategyPreset::IronCondor.apply(&mut form);
        assert!(LegField::ALL.iter().all(|f| form.leg(*f).is_some()));
    }
}
