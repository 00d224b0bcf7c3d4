use crate::infra::AppState;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use chrono::Local;
use medicaid_planning::domain::{ClientProfile, RawFinancialProfile};
use medicaid_planning::error::{AppError, PlanningError};
use medicaid_planning::planning::{PlanningModule, PlanningResult};
use medicaid_planning::PlanningEngine;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

/// Shared payload for every assessment endpoint: client facts, a loose
/// financial document normalized at this boundary, the jurisdiction, and
/// optional rule overrides.
#[derive(Debug, Deserialize)]
pub(crate) struct AssessmentRequest {
    pub(crate) client: ClientProfile,
    pub(crate) financial: RawFinancialProfile,
    pub(crate) jurisdiction: String,
    #[serde(default)]
    pub(crate) overrides: Option<Value>,
}

pub(crate) fn router(engine: Arc<PlanningEngine>) -> axum::Router {
    axum::Router::new()
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/eligibility",
            axum::routing::post(eligibility_endpoint),
        )
        .route(
            "/api/v1/planning/comprehensive",
            axum::routing::post(comprehensive_endpoint),
        )
        .route(
            "/api/v1/planning/module/:module",
            axum::routing::post(module_endpoint),
        )
        .with_state(engine)
}

pub(crate) async fn healthcheck() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn eligibility_endpoint(
    State(engine): State<Arc<PlanningEngine>>,
    Json(payload): Json<AssessmentRequest>,
) -> Result<Json<Value>, AppError> {
    let AssessmentRequest {
        client,
        financial,
        jurisdiction,
        overrides,
    } = payload;

    let financial = financial.normalize();
    let key = engine.rules().canonical_key(&jurisdiction)?;
    let eligibility =
        engine.evaluate_eligibility(&client, &financial, &key, overrides.as_ref())?;

    Ok(Json(json!({
        "status": "success",
        "jurisdiction": key,
        "eligibility": eligibility,
    })))
}

pub(crate) async fn comprehensive_endpoint(
    State(engine): State<Arc<PlanningEngine>>,
    Json(payload): Json<AssessmentRequest>,
) -> Result<Json<Value>, AppError> {
    let AssessmentRequest {
        client,
        financial,
        jurisdiction,
        overrides,
    } = payload;

    let financial = financial.normalize();
    let today = Local::now().date_naive();
    let plan =
        engine.comprehensive_plan(&client, &financial, &jurisdiction, overrides.as_ref(), today)?;

    let mut body = serde_json::to_value(&plan)
        .map_err(|err| PlanningError::Computation(format!("plan serialization failed: {err}")))?;
    body["status"] = json!("success");
    Ok(Json(body))
}

/// Single-stage assessment. The response body carries the stage's own
/// success/error envelope, so a failed stage is a 200 with
/// `"status":"error"` while request-level failures map through [`AppError`].
pub(crate) async fn module_endpoint(
    State(engine): State<Arc<PlanningEngine>>,
    Path(module): Path<String>,
    Json(payload): Json<AssessmentRequest>,
) -> Result<Json<PlanningResult>, AppError> {
    let module = PlanningModule::from_key(&module).ok_or_else(|| {
        PlanningError::Validation(format!("unknown planning module '{module}'"))
    })?;

    let AssessmentRequest {
        client,
        financial,
        jurisdiction,
        overrides,
    } = payload;

    let financial = financial.normalize();
    let today = Local::now().date_naive();
    let result = engine.module_plan(
        module,
        &client,
        &financial,
        &jurisdiction,
        overrides.as_ref(),
        today,
    )?;
    Ok(Json(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use medicaid_planning::domain::{HealthStatus, MaritalStatus};
    use medicaid_planning::planning::ModuleStatus;

    fn engine() -> State<Arc<PlanningEngine>> {
        State(Arc::new(PlanningEngine::with_builtin_rules()))
    }

    fn request(jurisdiction: &str) -> AssessmentRequest {
        serde_json::from_value(json!({
            "client": {
                "age": 82,
                "marital_status": "single",
                "health": "fair"
            },
            "financial": {
                "assets": { "Savings": "50,000" },
                "income": 1500
            },
            "jurisdiction": jurisdiction,
        }))
        .expect("request deserializes")
    }

    #[tokio::test]
    async fn eligibility_endpoint_reports_spenddown() {
        let Json(body) = eligibility_endpoint(engine(), Json(request("FL")))
            .await
            .expect("assessment succeeds");

        assert_eq!(body["status"], "success");
        assert_eq!(body["jurisdiction"], "florida");
        assert_eq!(body["eligibility"]["spenddown_amount"], 48_000.0);
        assert_eq!(body["eligibility"]["resource_eligible"], false);
    }

    #[tokio::test]
    async fn unknown_jurisdiction_maps_to_an_engine_error() {
        let err = eligibility_endpoint(engine(), Json(request("atlantis")))
            .await
            .expect_err("lookup fails");
        assert!(matches!(
            err,
            AppError::Engine(PlanningError::UnknownJurisdiction { .. })
        ));
    }

    #[tokio::test]
    async fn comprehensive_endpoint_wraps_the_plan_in_the_envelope() {
        let Json(body) = comprehensive_endpoint(engine(), Json(request("florida")))
            .await
            .expect("plan builds");

        assert_eq!(body["status"], "success");
        assert!(body["strategies"]
            .as_array()
            .is_some_and(|strategies| !strategies.is_empty()));
        assert!(body["report"].as_str().is_some_and(|text| !text.is_empty()));
    }

    #[tokio::test]
    async fn module_endpoint_returns_one_stage() {
        let Json(result) = module_endpoint(
            engine(),
            Path("asset".to_string()),
            Json(request("florida")),
        )
        .await
        .expect("stage extracts");

        assert_eq!(result.module, PlanningModule::Asset);
        assert!(matches!(result.status, ModuleStatus::Success));
        assert!(!result.strategies.is_empty());
    }

    #[tokio::test]
    async fn module_endpoint_rejects_unknown_stage_names() {
        let err = module_endpoint(
            engine(),
            Path("no-such-stage".to_string()),
            Json(request("florida")),
        )
        .await
        .expect_err("unknown stage rejected");
        assert!(matches!(
            err,
            AppError::Engine(PlanningError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn spousal_module_requires_a_married_client() {
        let mut payload = request("florida");
        payload.client.marital_status = MaritalStatus::Single;
        payload.client.health = HealthStatus::Fair;

        let err = module_endpoint(engine(), Path("spousal".to_string()), Json(payload))
            .await
            .expect_err("single client has no spousal stage");
        assert!(matches!(
            err,
            AppError::Engine(PlanningError::Validation(_))
        ));
    }
}
