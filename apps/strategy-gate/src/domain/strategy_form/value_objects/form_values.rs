//! Raw form state as handed over by the form collaborator.

use serde::{Deserialize, Serialize};

use super::leg::LegField;
use super::snapshot::InputSnapshot;

/// Raw values of the backtest form.
///
/// Leg fields hold the text exactly as typed. Parsing happens in
/// [`InputSnapshot::read`], never here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormValues {
    /// Underlying instrument code (e.g. "510300").
    #[serde(default)]
    pub etf_code: String,
    /// Backtest start date text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// Backtest end date text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    /// Sold put delta text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub put_sell_delta: Option<String>,
    /// Bought put delta text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub put_buy_delta: Option<String>,
    /// Sold call delta text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_sell_delta: Option<String>,
    /// Bought call delta text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_buy_delta: Option<String>,
    /// Save the run as a named scheme.
    #[serde(default)]
    pub save_scheme: bool,
    /// Scheme name (only meaningful with `save_scheme`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme_name: Option<String>,
    /// Existing scheme to overwrite.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme_id: Option<String>,
}

impl FormValues {
    /// Create an empty form for an instrument.
    #[must_use]
    pub fn for_etf(etf_code: impl Into<String>) -> Self {
        Self {
            etf_code: etf_code.into(),
            ..Self::default()
        }
    }

    /// Raw text of a leg field.
    #[must_use]
    pub fn leg(&self, field: LegField) -> Option<&str> {
        match field {
            LegField::PutSell => self.put_sell_delta.as_deref(),
            LegField::PutBuy => self.put_buy_delta.as_deref(),
            LegField::CallSell => self.call_sell_delta.as_deref(),
            LegField::CallBuy => self.call_buy_delta.as_deref(),
        }
    }

    /// Replace the raw text of a leg field.
    pub fn set_leg(&mut self, field: LegField, raw: Option<String>) {
        let slot = match field {
            LegField::PutSell => &mut self.put_sell_delta,
            LegField::PutBuy => &mut self.put_buy_delta,
            LegField::CallSell => &mut self.call_sell_delta,
            LegField::CallBuy => &mut self.call_buy_delta,
        };
        *slot = raw;
    }

    /// Builder-style leg setter.
    #[must_use]
    pub fn with_leg(mut self, field: LegField, raw: impl Into<String>) -> Self {
        self.set_leg(field, Some(raw.into()));
        self
    }

    /// Builder-style date range setter.
    #[must_use]
    pub fn with_dates(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start_date = Some(start.into());
        self.end_date = Some(end.into());
        self
    }

    /// Clear all four leg fields.
    pub fn clear_legs(&mut self) {
        for field in LegField::ALL {
            self.set_leg(field, None);
        }
    }

    /// Parse the current leg fields.
    #[must_use]
    pub fn snapshot(&self) -> InputSnapshot {
        InputSnapshot::read(self)
    }

    /// Start date text, with blank treated as absent.
    #[must_use]
    pub fn start_date_text(&self) -> Option<&str> {
        non_blank(self.start_date.as_deref())
    }

    /// End date text, with blank treated as absent.
    #[must_use]
    pub fn end_date_text(&self) -> Option<&str> {
        non_blank(self.end_date.as_deref())
    }

    /// Scheme name, with blank treated as absent.
    #[must_use]
    pub fn scheme_name_text(&self) -> Option<&str> {
        non_blank(self.scheme_name.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_clear_legs() {
        let mut form = FormValues::for_etf("510300").with_leg(LegField::PutSell, "-0.3");
        assert_eq!(form.leg(LegField::PutSell), Some("-0.3"));
        assert_eq!(form.leg(LegField::CallBuy), None);

        form.clear_legs();
        assert!(LegField::ALL.iter().all(|f| form.leg(*f).is_none()));
        assert_eq!(form.etf_code, "510300");
    }

    #[test]
    fn blank_dates_are_absent() {
        let form = FormValues::default().with_dates("  ", "2024-01-01");
        assert_eq!(form.start_date_text(), None);
        assert_eq!(form.end_date_text(), Some("2024-01-01"));
    }

    #[test]
    fn deserializes_partial_form() {
        let form: FormValues =
            serde_json::from_str(r#"{"etf_code":"510050","put_sell_delta":"-0.5"}"#).unwrap();
        assert_eq!(form.etf_code, "510050");
        assert_eq!(form.leg(LegField::PutSell), Some("-0.5"));
        assert!(!form.save_scheme);
    }
}
