//! Backtest request DTO.

use serde::{Deserialize, Serialize};

use crate::domain::strategy_form::{
    ApprovedSubmission, DATE_FORMAT, FormValues, StrategyParams,
};

/// Body of `POST /api/backtest` on the backtest service.
///
/// Optional values are omitted when absent; `save_scheme` is only sent
/// when set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BacktestRequest {
    /// Underlying instrument code.
    pub etf_code: String,
    /// Start date (YYYY-MM-DD).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// End date (YYYY-MM-DD).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    /// Leg deltas.
    pub strategy_params: StrategyParams,
    /// Save the run as a named scheme.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub save_scheme: bool,
    /// Scheme name, present only when saving.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme_name: Option<String>,
    /// Scheme to overwrite, present only when saving.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme_id: Option<String>,
}

impl BacktestRequest {
    /// Build the request for a form that passed the gate.
    #[must_use]
    pub fn from_approved(form: &FormValues, approved: &ApprovedSubmission) -> Self {
        let saving = approved.scheme_name.is_some();
        Self {
            etf_code: form.etf_code.trim().to_string(),
            start_date: approved
                .start_date
                .map(|d| d.format(DATE_FORMAT).to_string()),
            end_date: approved.end_date.map(|d| d.format(DATE_FORMAT).to_string()),
            strategy_params: StrategyParams::from(&approved.snapshot),
            save_scheme: saving,
            scheme_name: approved.scheme_name.clone(),
            scheme_id: form
                .scheme_id
                .as_deref()
                .map(str::trim)
                .filter(|id| saving && !id.is_empty())
                .map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::strategy_form::{LegField, check_submission};
    use serde_json::json;

    #[test]
    fn omits_absent_fields() {
        let form = FormValues::for_etf("510300")
            .with_leg(LegField::PutSell, "-0.3")
            .with_leg(LegField::PutBuy, "-0.2");
        let approved = check_submission(&form).unwrap();
        let body = serde_json::to_value(BacktestRequest::from_approved(&form, &approved)).unwrap();

        assert_eq!(
            body,
            json!({
                "etf_code": "510300",
                "strategy_params": {"put_sell_delta": -0.3, "put_buy_delta": -0.2}
            })
        );
    }

    #[test]
    fn includes_scheme_fields_when_saving() {
        let mut form = FormValues::for_etf("510050")
            .with_leg(LegField::PutSell, "-0.5")
            .with_leg(LegField::CallSell, "0.5")
            .with_dates("2023-01-01", "2023-12-31");
        form.save_scheme = true;
        form.scheme_name = Some("wheel 2023".to_string());
        form.scheme_id = Some("42".to_string());

        let approved = check_submission(&form).unwrap();
        let body = serde_json::to_value(BacktestRequest::from_approved(&form, &approved)).unwrap();

        assert_eq!(
            body,
            json!({
                "etf_code": "510050",
                "start_date": "2023-01-01",
                "end_date": "2023-12-31",
                "strategy_params": {"put_sell_delta": -0.5, "call_sell_delta": 0.5},
                "save_scheme": true,
                "scheme_name": "wheel 2023",
                "scheme_id": "42"
            })
        );
    }

    #[test]
    fn scheme_id_dropped_when_not_saving() {
        let mut form = FormValues::for_etf("510300").with_leg(LegField::PutSell, "-0.3");
        form.scheme_id = Some("7".to_string());
        let approved = check_submission(&form).unwrap();
        let request = BacktestRequest::from_approved(&form, &approved);
        assert_eq!(request.scheme_id, None);
        assert!(!request.save_scheme);
    }
}
