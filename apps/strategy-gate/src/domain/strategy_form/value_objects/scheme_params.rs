//! Saved-scheme parameters and default scheme naming.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::form_values::FormValues;
use super::leg::LegField;
use super::snapshot::InputSnapshot;
use super::strategy_params::StrategyParams;

/// Parameters stored with a named scheme.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemeParams {
    /// Underlying instrument code.
    #[serde(default)]
    pub etf_code: String,
    /// Backtest start date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// Backtest end date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    /// Present deltas in form order (put sell, put buy, call sell, call buy).
    ///
    /// The list does not say which leg a value belongs to, so filling reads
    /// it positionally and only when `strategy_params` carries no leg.
    /// Older schemes store four slots with `null` gaps, which fill exactly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta_list: Option<Vec<Option<Decimal>>>,
    /// Deltas keyed by leg.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy_params: Option<StrategyParams>,
}

impl SchemeParams {
    /// Capture the scheme parameters of a form.
    #[must_use]
    pub fn from_form(form: &FormValues) -> Self {
        let snapshot = form.snapshot();
        Self {
            etf_code: form.etf_code.clone(),
            start_date: form.start_date_text().map(str::to_string),
            end_date: form.end_date_text().map(str::to_string),
            delta_list: Some(
                snapshot
                    .present_legs()
                    .map(|(_, value)| Some(value))
                    .collect(),
            ),
            strategy_params: Some(StrategyParams::from(&snapshot)),
        }
    }

    /// Fill a form from these parameters, replacing all four legs.
    pub fn apply_to(&self, form: &mut FormValues) {
        form.etf_code.clone_from(&self.etf_code);
        form.start_date.clone_from(&self.start_date);
        form.end_date.clone_from(&self.end_date);
        form.clear_legs();

        let keyed = self
            .strategy_params
            .map(InputSnapshot::from)
            .filter(|snapshot| !snapshot.is_empty());

        let snapshot = match (keyed, &self.delta_list) {
            (Some(snapshot), _) => snapshot,
            (None, Some(list)) => LegField::ALL
                .into_iter()
                .zip(list)
                .fold(InputSnapshot::default(), |snapshot, (field, value)| {
                    snapshot.with(field, *value)
                }),
            (None, None) => InputSnapshot::default(),
        };

        for (field, value) in snapshot.present_legs() {
            form.set_leg(field, Some(value.normalize().to_string()));
        }
    }
}

/// Default scheme name: `<etf>_<deltas>_<start>_<end>`, skipping empty parts.
#[must_use]
pub fn default_scheme_name(form: &FormValues) -> String {
    let etf = form.etf_code.trim();
    let mut name = if etf.is_empty() {
        "scheme".to_string()
    } else {
        etf.to_string()
    };

    let deltas: Vec<String> = form
        .snapshot()
        .present_legs()
        .map(|(_, value)| value.normalize().to_string())
        .collect();
    if !deltas.is_empty() {
        name.push('_');
        name.push_str(&deltas.join(","));
    }

    for date in [form.start_date_text(), form.end_date_text()]
        .into_iter()
        .flatten()
    {
        name.push('_');
        name.push_str(&date.replace('-', ""));
    }

    name
}
