//! Input Snapshot Value Object
//!
//! Immutable parse of the four delta fields. Re-read from the form on every
//! event; classification and validation only ever borrow it.

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};

use super::form_values::FormValues;
use super::leg::{LegField, OptionType};

/// Parsed delta inputs. `None` means the leg has no usable value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InputSnapshot {
    /// Sold put delta, expected in (-1, 0).
    pub put_sell_delta: Option<Decimal>,
    /// Bought put delta, expected in (-1, 0).
    pub put_buy_delta: Option<Decimal>,
    /// Sold call delta, expected in (0, 1).
    pub call_sell_delta: Option<Decimal>,
    /// Bought call delta, expected in (0, 1).
    pub call_buy_delta: Option<Decimal>,
}

impl InputSnapshot {
    /// Create a snapshot from already-parsed values.
    #[must_use]
    pub const fn new(
        put_sell_delta: Option<Decimal>,
        put_buy_delta: Option<Decimal>,
        call_sell_delta: Option<Decimal>,
        call_buy_delta: Option<Decimal>,
    ) -> Self {
        Self {
            put_sell_delta,
            put_buy_delta,
            call_sell_delta,
            call_buy_delta,
        }
    }

    /// Read and parse the leg fields of a form.
    #[must_use]
    pub fn read(form: &FormValues) -> Self {
        let parse = |field| form.leg(field).and_then(parse_delta);
        Self::new(
            parse(LegField::PutSell),
            parse(LegField::PutBuy),
            parse(LegField::CallSell),
            parse(LegField::CallBuy),
        )
    }

    /// Value of a single leg.
    #[must_use]
    pub const fn get(&self, field: LegField) -> Option<Decimal> {
        match field {
            LegField::PutSell => self.put_sell_delta,
            LegField::PutBuy => self.put_buy_delta,
            LegField::CallSell => self.call_sell_delta,
            LegField::CallBuy => self.call_buy_delta,
        }
    }

    /// Copy with one leg replaced.
    #[must_use]
    pub const fn with(mut self, field: LegField, value: Option<Decimal>) -> Self {
        match field {
            LegField::PutSell => self.put_sell_delta = value,
            LegField::PutBuy => self.put_buy_delta = value,
            LegField::CallSell => self.call_sell_delta = value,
            LegField::CallBuy => self.call_buy_delta = value,
        }
        self
    }

    /// Whether no leg carries a value.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.put_sell_delta.is_none()
            && self.put_buy_delta.is_none()
            && self.call_sell_delta.is_none()
            && self.call_buy_delta.is_none()
    }

    /// Present legs in form order.
    pub fn present_legs(&self) -> impl Iterator<Item = (LegField, Decimal)> + '_ {
        LegField::ALL
            .into_iter()
            .filter_map(|field| self.get(field).map(|value| (field, value)))
    }

    /// Number of present legs on one side.
    #[must_use]
    pub fn side_count(&self, option_type: OptionType) -> usize {
        self.present_legs()
            .filter(|(field, _)| field.option_type() == option_type)
            .count()
    }
}

/// Parse one delta field.
///
/// Blank, unparseable and non-finite input all read as absent. Finite numbers
/// outside `Decimal`'s range stay present: magnitudes past `Decimal::MAX`
/// saturate, and nonzero magnitudes below its precision keep their sign at
/// the smallest representable step.
#[must_use]
pub fn parse_delta(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let exact = Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok();
    let approx = trimmed.parse::<f64>().ok().filter(|value| value.is_finite());

    match (exact, approx) {
        (Some(value), Some(float)) if value.is_zero() && float != 0.0 => {
            Some(smallest_step(float))
        }
        (Some(value), _) => Some(value),
        (None, Some(float)) => Some(saturating_from_f64(float)),
        (None, None) => None,
    }
}

fn saturating_from_f64(float: f64) -> Decimal {
    match Decimal::from_f64(float) {
        Some(value) if !value.is_zero() || float == 0.0 => value,
        _ if float.abs() >= 1.0 => {
            if float.is_sign_negative() {
                Decimal::MIN
            } else {
                Decimal::MAX
            }
        }
        _ => smallest_step(float),
    }
}

fn smallest_step(float: f64) -> Decimal {
    let step = Decimal::new(1, Decimal::MAX_SCALE);
    if float.is_sign_negative() { -step } else { step }
}
