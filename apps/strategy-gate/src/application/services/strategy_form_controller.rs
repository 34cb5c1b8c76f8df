//! Strategy Form Controller
//!
//! Drives the strategy panel from the form. Every leg edit re-runs
//! classification and validation and repaints the indicator and error
//! banner. Submission runs the gate and only a passing form reaches the
//! backtest service.

use std::sync::Arc;
use std::time::Instant;

use tracing::Instrument;
use uuid::Uuid;

use crate::application::dto::BacktestRequest;
use crate::application::ports::{BacktestPort, FormPort, StrategyViewPort};
use crate::domain::strategy_form::{
    FormValues, LegField, Locale, SchemeParams, StrategyPreset, StrategyVerdict,
    SubmissionRejection, ValidationResult, check_submission, default_scheme_name, evaluate,
};
use crate::error::SubmitError;
use crate::observability::{record_backend_call, record_field_change, record_submission};

/// Success notice shown after a run that saved a scheme.
pub const SCHEME_SAVED_NOTICE: &str = "scheme saved";

/// Result of re-evaluating the form after a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldChangeOutcome {
    /// Detected strategy.
    pub verdict: StrategyVerdict,
    /// Leg validation.
    pub validation: ValidationResult,
}

/// A backtest that passed the gate and ran.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitOutcome {
    /// Correlation id for logs.
    pub submission_id: Uuid,
    /// Strategy submitted.
    pub verdict: StrategyVerdict,
    /// Request sent to the backtest service.
    pub request: BacktestRequest,
    /// Service response body.
    pub response: serde_json::Value,
}

/// Controller binding the strategy form to the panel and backtest service.
pub struct StrategyFormController<F, V, B>
where
    F: FormPort,
    V: StrategyViewPort,
    B: BacktestPort,
{
    form: Arc<F>,
    view: Arc<V>,
    backtest: Arc<B>,
    locale: Locale,
}

impl<F, V, B> StrategyFormController<F, V, B>
where
    F: FormPort,
    V: StrategyViewPort,
    B: BacktestPort,
{
    /// Create a new controller.
    pub const fn new(form: Arc<F>, view: Arc<V>, backtest: Arc<B>, locale: Locale) -> Self {
        Self {
            form,
            view,
            backtest,
            locale,
        }
    }

    /// Locale used for indicator labels.
    #[must_use]
    pub const fn locale(&self) -> Locale {
        self.locale
    }

    /// Re-evaluate the form and repaint the panel.
    pub fn on_field_change(&self) -> FieldChangeOutcome {
        let snapshot = self.form.read_form().snapshot();
        let (verdict, validation) = evaluate(&snapshot);

        match verdict.label(self.locale) {
            Some(label) => self.view.show_strategy(label),
            None => self.view.hide_strategy(),
        }

        match validation.violation() {
            Some(violation) => {
                self.view.show_error(&violation.to_string());
                self.view.mark_strategy_invalid(true);
            }
            None => {
                self.view.clear_error();
                self.view.mark_strategy_invalid(false);
            }
        }

        record_field_change(
            &verdict.to_string(),
            validation.violation().map(|violation| violation.kind().as_str()),
        );
        tracing::debug!(
            strategy = %verdict,
            valid = validation.is_ok(),
            legs = snapshot.present_legs().count(),
            "Strategy re-evaluated"
        );

        FieldChangeOutcome {
            verdict,
            validation,
        }
    }

    /// Set one leg field and re-evaluate.
    pub fn set_field(&self, field: LegField, raw: Option<String>) -> FieldChangeOutcome {
        self.update_form(|form| form.set_leg(field, raw))
    }

    /// Apply a quick-setup preset and re-evaluate.
    pub fn apply_preset(&self, preset: StrategyPreset) -> FieldChangeOutcome {
        tracing::debug!(?preset, "Applying strategy preset");
        self.update_form(|form| preset.apply(form))
    }

    /// Load a saved scheme into the form and re-evaluate.
    pub fn fill_from_scheme(&self, params: &SchemeParams) -> FieldChangeOutcome {
        self.update_form(|form| params.apply_to(form))
    }

    /// Parameters to store with a scheme built from the current form.
    pub fn scheme_params(&self) -> SchemeParams {
        SchemeParams::from_form(&self.form.read_form())
    }

    /// Suggested name for a scheme built from the current form.
    pub fn default_scheme_name(&self) -> String {
        default_scheme_name(&self.form.read_form())
    }

    /// Run the submission gate and build the backtest request.
    ///
    /// # Errors
    ///
    /// Returns the first gate rule the form violates.
    pub fn prepare_submission(
        &self,
    ) -> Result<(StrategyVerdict, BacktestRequest), SubmissionRejection> {
        let form = self.form.read_form();
        let approved = check_submission(&form)?;
        Ok((approved.verdict, BacktestRequest::from_approved(&form, &approved)))
    }

    /// Gate the form and, if it passes, run the backtest.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::Rejected`] without calling the service when
    /// the gate refuses the form, or [`SubmitError::Backend`] when the
    /// service call fails. Either way the message is on the error banner.
    pub async fn submit(&self) -> Result<SubmitOutcome, SubmitError> {
        self.view.clear_error();

        let (verdict, request) = match self.prepare_submission() {
            Ok(prepared) => prepared,
            Err(rejection) => {
                let kind = rejection.kind();
                tracing::info!(reason = kind.as_str(), error = %rejection, "Submission rejected");
                record_submission(kind.as_str());
                self.view.show_error(&rejection.to_string());
                return Err(rejection.into());
            }
        };

        let submission_id = Uuid::new_v4();
        let span = tracing::info_span!(
            "backtest",
            %submission_id,
            strategy = %verdict,
            etf_code = %request.etf_code,
            save_scheme = request.save_scheme,
        );

        self.view.set_loading(true);
        let started = Instant::now();
        let result = self
            .backtest
            .run_backtest(&request)
            .instrument(span)
            .await;
        self.view.set_loading(false);

        let elapsed = started.elapsed().as_secs_f64();
        match result {
            Ok(response) => {
                record_backend_call("ok", elapsed);
                record_submission("accepted");
                tracing::info!(%submission_id, elapsed_secs = elapsed, "Backtest completed");
                if request.save_scheme {
                    self.view.show_success(SCHEME_SAVED_NOTICE);
                }
                Ok(SubmitOutcome {
                    submission_id,
                    verdict,
                    request,
                    response,
                })
            }
            Err(e) => {
                record_backend_call("error", elapsed);
                record_submission("backend_error");
                tracing::warn!(%submission_id, error = %e, elapsed_secs = elapsed, "Backtest failed");
                self.view.show_error(&e.to_string());
                Err(e.into())
            }
        }
    }

    fn update_form(&self, edit: impl FnOnce(&mut FormValues)) -> FieldChangeOutcome {
        let mut form = self.form.read_form();
        edit(&mut form);
        self.form.write_form(form);
        self.on_field_change()
    }
}
