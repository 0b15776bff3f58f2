use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{
    ApplicationId, CreditApplicationStatus, DecisionRecord, LoanApplicationSubmission,
};
use super::repository::{ApplicationRepository, NotificationPublisher, RepositoryError};
use super::service::{AnalysisRequest, CreditApplicationService, CreditServiceError};
use crate::workflows::credit::analysis::{IncomeExpenseRecord, Recommendation, RiskInput};

/// Router builder exposing HTTP endpoints for intake, analysis, risk
/// screening, and decisions.
pub fn application_router<R, N>(service: Arc<CreditApplicationService<R, N>>) -> Router
where
    R: ApplicationRepository + 'static,
    N: NotificationPublisher + 'static,
{
    Router::new()
        .route("/api/v1/credit/applications", post(submit_handler::<R, N>))
        .route(
            "/api/v1/credit/applications/:application_id",
            get(status_handler::<R, N>),
        )
        .route(
            "/api/v1/credit/applications/:application_id/capacity",
            post(capacity_handler::<R, N>),
        )
        .route(
            "/api/v1/credit/applications/:application_id/decision",
            post(decision_handler::<R, N>),
        )
        .route("/api/v1/credit/analysis", post(analysis_handler::<R, N>))
        .route("/api/v1/credit/risk", post(risk_handler::<R, N>))
        .with_state(service)
}

pub(crate) async fn submit_handler<R, N>(
    State(service): State<Arc<CreditApplicationService<R, N>>>,
    axum::Json(submission): axum::Json<LoanApplicationSubmission>,
) -> Response
where
    R: ApplicationRepository + 'static,
    N: NotificationPublisher + 'static,
{
    match service.submit(submission) {
        Ok(record) => {
            let view = record.status_view();
            (StatusCode::ACCEPTED, axum::Json(view)).into_response()
        }
        Err(CreditServiceError::Intake(error)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(CreditServiceError::Repository(RepositoryError::Conflict)) => {
            let payload = json!({
                "error": "application already exists",
            });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn status_handler<R, N>(
    State(service): State<Arc<CreditApplicationService<R, N>>>,
    Path(application_id): Path<String>,
) -> Response
where
    R: ApplicationRepository + 'static,
    N: NotificationPublisher + 'static,
{
    let id = ApplicationId(application_id);
    match service.get(&id) {
        Ok(record) => {
            let view = record.status_view();
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(CreditServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "application_id": id.0,
                "status": CreditApplicationStatus::Submitted.label(),
                "decision_rationale": "menunggu analisis",
                "recommendation": serde_json::Value::Null,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct CapacityRequest {
    income_expense: Option<IncomeExpenseRecord>,
}

pub(crate) async fn capacity_handler<R, N>(
    State(service): State<Arc<CreditApplicationService<R, N>>>,
    Path(application_id): Path<String>,
    axum::Json(request): axum::Json<CapacityRequest>,
) -> Response
where
    R: ApplicationRepository + 'static,
    N: NotificationPublisher + 'static,
{
    let id = ApplicationId(application_id);
    match service.run_capacity(&id, request.income_expense) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(CreditServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({ "error": "application not found" });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(error @ (CreditServiceError::MissingWorksheet | CreditServiceError::Capacity(_))) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct AnalysisResponse {
    pub summary: String,
    pub recommendation: Recommendation,
    pub factors: Vec<String>,
}

/// Thin adapter over the synthesizer: passes its output through unchanged and
/// collapses every failure into one fixed payload so screen scripts can key
/// off a single shape.
pub(crate) async fn analysis_handler<R, N>(
    State(service): State<Arc<CreditApplicationService<R, N>>>,
    axum::Json(request): axum::Json<AnalysisRequest>,
) -> Response
where
    R: ApplicationRepository + 'static,
    N: NotificationPublisher + 'static,
{
    match service.analyze(&request) {
        Ok(outcome) => {
            let response = AnalysisResponse {
                summary: outcome.narrative,
                recommendation: outcome.recommendation,
                factors: outcome.factors,
            };
            (StatusCode::OK, axum::Json(response)).into_response()
        }
        Err(error) => {
            tracing::error!(%error, "analysis request failed");
            let payload = json!({
                "status": "gagal",
                "message": "Analisis tidak dapat diproses",
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct RiskRequest {
    application_id: Option<String>,
    #[serde(flatten)]
    input: RiskInput,
}

pub(crate) async fn risk_handler<R, N>(
    State(service): State<Arc<CreditApplicationService<R, N>>>,
    axum::Json(request): axum::Json<RiskRequest>,
) -> Response
where
    R: ApplicationRepository + 'static,
    N: NotificationPublisher + 'static,
{
    let id = request.application_id.map(ApplicationId);
    match service.assess_risk(id.as_ref(), &request.input) {
        Ok(assessment) => (StatusCode::OK, axum::Json(assessment)).into_response(),
        Err(CreditServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({ "error": "application not found" });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn decision_handler<R, N>(
    State(service): State<Arc<CreditApplicationService<R, N>>>,
    Path(application_id): Path<String>,
    axum::Json(decision): axum::Json<DecisionRecord>,
) -> Response
where
    R: ApplicationRepository + 'static,
    N: NotificationPublisher + 'static,
{
    let id = ApplicationId(application_id);
    match service.decide(&id, decision) {
        Ok(record) => {
            let view = record.status_view();
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(CreditServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({ "error": "application not found" });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
