//! HTTP Controller (Driver Adapter)
//!
//! Axum-based REST API that delegates to the strategy form controller.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};

use crate::application::ports::{BacktestPort, FormPort};
use crate::application::services::{FieldChangeOutcome, StrategyFormController};
use crate::domain::strategy_form::{FormValues, Locale, SchemeParams};
use crate::infrastructure::form::InMemoryForm;
use crate::infrastructure::view::InMemoryStrategyView;

use super::request::{FillSchemeRequest, PresetRequest};
use super::response::{
    FormUpdateResponse, HealthResponse, PanelResponse, SchemeNameResponse, SubmitErrorResponse,
};

/// Header carrying the submission correlation id.
const SUBMISSION_ID_HEADER: &str = "x-submission-id";

/// Application state shared across handlers.
pub struct AppState<B>
where
    B: BacktestPort,
{
    /// Backtest service adapter.
    pub backtest: Arc<B>,
    /// Locale for indicator labels.
    pub locale: Locale,
    /// Application version.
    pub version: String,
}

impl<B> Clone for AppState<B>
where
    B: BacktestPort,
{
    fn clone(&self) -> Self {
        Self {
            backtest: Arc::clone(&self.backtest),
            locale: self.locale,
            version: self.version.clone(),
        }
    }
}

type RequestController<B> = StrategyFormController<InMemoryForm, InMemoryStrategyView, B>;

impl<B> AppState<B>
where
    B: BacktestPort,
{
    /// Controller bound to a fresh form and panel for one request.
    fn controller(
        &self,
        form: FormValues,
    ) -> (RequestController<B>, Arc<InMemoryForm>, Arc<InMemoryStrategyView>) {
        let form = Arc::new(InMemoryForm::new(form));
        let view = Arc::new(InMemoryStrategyView::new());
        let controller = StrategyFormController::new(
            Arc::clone(&form),
            Arc::clone(&view),
            Arc::clone(&self.backtest),
            self.locale,
        );
        (controller, form, view)
    }
}

/// Create the HTTP router with all endpoints.
pub fn create_router<B>(state: AppState<B>) -> Router
where
    B: BacktestPort + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .route("/api/v1/strategy/detect", post(detect_strategy))
        .route("/api/v1/strategy/preset", post(apply_preset))
        .route("/api/v1/schemes/default-name", post(default_scheme_name))
        .route("/api/v1/schemes/params", post(scheme_params))
        .route("/api/v1/schemes/fill", post(fill_scheme))
        .route("/api/v1/backtest", post(run_backtest))
        .with_state(state)
}

/// Health check endpoint.
async fn health_check<B>(State(state): State<AppState<B>>) -> impl IntoResponse
where
    B: BacktestPort,
{
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
    })
}

/// Classify and validate a form.
async fn detect_strategy<B>(
    State(state): State<AppState<B>>,
    Json(form): Json<FormValues>,
) -> impl IntoResponse
where
    B: BacktestPort,
{
    let (controller, _, view) = state.controller(form);
    let outcome = controller.on_field_change();
    Json(PanelResponse::new(&outcome, &view.state()))
}

/// Apply a preset to a form.
async fn apply_preset<B>(
    State(state): State<AppState<B>>,
    Json(request): Json<PresetRequest>,
) -> impl IntoResponse
where
    B: BacktestPort,
{
    let (controller, form, view) = state.controller(request.form);
    let outcome = controller.apply_preset(request.preset);
    form_update(&outcome, &form, &view)
}

/// Fill a form from saved scheme parameters.
async fn fill_scheme<B>(
    State(state): State<AppState<B>>,
    Json(request): Json<FillSchemeRequest>,
) -> impl IntoResponse
where
    B: BacktestPort,
{
    let (controller, form, view) = state.controller(request.form);
    let outcome = controller.fill_from_scheme(&request.params);
    form_update(&outcome, &form, &view)
}

/// Suggest a scheme name for a form.
async fn default_scheme_name<B>(
    State(state): State<AppState<B>>,
    Json(form): Json<FormValues>,
) -> impl IntoResponse
where
    B: BacktestPort,
{
    let (controller, _, _) = state.controller(form);
    Json(SchemeNameResponse {
        name: controller.default_scheme_name(),
    })
}

/// Extract scheme parameters from a form.
async fn scheme_params<B>(
    State(state): State<AppState<B>>,
    Json(form): Json<FormValues>,
) -> Json<SchemeParams>
where
    B: BacktestPort,
{
    let (controller, _, _) = state.controller(form);
    Json(controller.scheme_params())
}

/// Gate a form and run the backtest.
async fn run_backtest<B>(State(state): State<AppState<B>>, Json(form): Json<FormValues>) -> Response
where
    B: BacktestPort,
{
    let (controller, _, _) = state.controller(form);

    match controller.submit().await {
        Ok(outcome) => (
            StatusCode::OK,
            [(SUBMISSION_ID_HEADER, outcome.submission_id.to_string())],
            Json(outcome.response),
        )
            .into_response(),
        Err(e) => {
            let code = e.code();
            let status = StatusCode::from_u16(code.http_status())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (
                status,
                Json(SubmitErrorResponse {
                    ok: false,
                    code,
                    message: e.to_string(),
                    violation: e.violation().map(|violation| violation.code().to_string()),
                }),
            )
                .into_response()
        }
    }
}

fn form_update(
    outcome: &FieldChangeOutcome,
    form: &InMemoryForm,
    view: &InMemoryStrategyView,
) -> Json<FormUpdateResponse> {
    Json(FormUpdateResponse {
        form: form.read_form(),
        panel: PanelResponse::new(outcome, &view.state()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{BacktestError, MockBacktestPort};
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn router(backtest: MockBacktestPort, locale: Locale) -> Router {
        create_router(AppState {
            backtest: Arc::new(backtest),
            locale,
            version: "test".to_string(),
        })
    }

    fn idle_backend() -> MockBacktestPort {
        let mut backtest = MockBacktestPort::new();
        backtest.expect_run_backtest().times(0);
        backtest
    }

    async fn post(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn health_check_returns_version() {
        let app = router(idle_backend(), Locale::Zh);
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["version"], "test");
    }

    #[tokio::test]
    async fn detect_iron_condor_in_chinese() {
        let (status, body) = post(
            router(idle_backend(), Locale::Zh),
            "/api/v1/strategy/detect",
            json!({
                "etf_code": "510300",
                "put_sell_delta": "-0.3",
                "put_buy_delta": "-0.15",
                "call_sell_delta": "0.3",
                "call_buy_delta": "0.15"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "strategy": "iron_condor",
                "label": "铁鹰策略 (Iron Condor)",
                "indicator_visible": true,
                "indicator_invalid": false,
                "error": null
            })
        );
    }

    #[tokio::test]
    async fn detect_reports_violation() {
        let (_, body) = post(
            router(idle_backend(), Locale::En),
            "/api/v1/strategy/detect",
            json!({"put_sell_delta": "-1"}),
        )
        .await;

        assert_eq!(body["strategy"], "naked_put");
        assert_eq!(body["indicator_invalid"], true);
        assert_eq!(body["error"], "PUT delta must be between -1 and 0");
    }

    #[tokio::test]
    async fn preset_rewrites_form() {
        let (status, body) = post(
            router(idle_backend(), Locale::En),
            "/api/v1/strategy/preset",
            json!({"preset": "wheel", "form": {"etf_code": "510050", "put_buy_delta": "-0.1"}}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["form"]["etf_code"], "510050");
        assert_eq!(body["form"]["put_sell_delta"], "-0.5");
        assert!(body["form"].get("put_buy_delta").is_none());
        assert_eq!(body["panel"]["label"], "Wheel Strategy");
    }

    #[tokio::test]
    async fn default_name_endpoint() {
        let (_, body) = post(
            router(idle_backend(), Locale::Zh),
            "/api/v1/schemes/default-name",
            json!({
                "etf_code": "510300",
                "put_sell_delta": "-0.3",
                "put_buy_delta": "-0.2",
                "start_date": "2023-01-01",
                "end_date": "2023-12-31"
            }),
        )
        .await;
        assert_eq!(body["name"], "510300_-0.3,-0.2_20230101_20231231");
    }

    #[tokio::test]
    async fn fill_scheme_endpoint() {
        let (_, body) = post(
            router(idle_backend(), Locale::En),
            "/api/v1/schemes/fill",
            json!({"params": {"etf_code": "510500", "delta_list": [-0.4, -0.25]}}),
        )
        .await;
        assert_eq!(body["form"]["put_sell_delta"], "-0.4");
        assert_eq!(body["form"]["put_buy_delta"], "-0.25");
        assert_eq!(body["panel"]["strategy"], "bullish_put");
    }

    #[tokio::test]
    async fn backtest_rejected_with_422() {
        let (status, body) = post(
            router(idle_backend(), Locale::Zh),
            "/api/v1/backtest",
            json!({"etf_code": "510300"}),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body,
            json!({
                "ok": false,
                "code": "EMPTY_SELECTION",
                "message": "select at least one strategy"
            })
        );
    }

    #[tokio::test]
    async fn backtest_passes_backend_body_through() {
        let mut backtest = MockBacktestPort::new();
        backtest
            .expect_run_backtest()
            .times(1)
            .returning(|_| Ok(json!({"annual_return": 0.08})));

        let (status, body) = post(
            router(backtest, Locale::Zh),
            "/api/v1/backtest",
            json!({"etf_code": "510300", "put_sell_delta": "-0.3"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"annual_return": 0.08}));
    }

    #[tokio::test]
    async fn backtest_backend_error_is_502() {
        let mut backtest = MockBacktestPort::new();
        backtest.expect_run_backtest().times(1).returning(|_| {
            Err(BacktestError::Rejected {
                status: 400,
                message: "unknown etf".to_string(),
            })
        });

        let (status, body) = post(
            router(backtest, Locale::Zh),
            "/api/v1/backtest",
            json!({"etf_code": "999999", "put_sell_delta": "-0.3"}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["code"], "BACKEND_REJECTED");
        assert_eq!(body["message"], "unknown etf");
    }
}
