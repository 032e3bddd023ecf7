use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use rust_decimal::Decimal;
use sale_advisor::error::AppError;
use sale_advisor::workflows::disposition::{
    advisory_router, compare, AdvisoryService, ComparisonResult, EquityPosition,
};
use sale_advisor::workflows::valuation::{PropertyDescription, ValuationResult};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub(crate) struct CompareRequest {
    pub(crate) property_value: Decimal,
    #[serde(default)]
    pub(crate) loan_balance: Decimal,
}

#[derive(Debug, Serialize)]
pub(crate) struct ValuationResponse {
    pub(crate) valuation: ValuationResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) equity: Option<EquityPosition>,
}

pub(crate) fn with_service_routes(service: Arc<AdvisoryService>) -> Router {
    advisory_router(Arc::clone(&service))
        .route("/api/v1/valuation", post(valuation_endpoint))
        .route("/api/v1/sale-options/compare", post(compare_endpoint))
        .layer(Extension(service))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
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

pub(crate) async fn valuation_endpoint(
    Extension(service): Extension<Arc<AdvisoryService>>,
    Json(property): Json<PropertyDescription>,
) -> Result<Json<ValuationResponse>, AppError> {
    let valuation = service.engine().estimate(&property)?;
    let equity = property
        .loan_balance
        .map(|balance| EquityPosition::assess(valuation.estimated_value, balance))
        .transpose()?;

    Ok(Json(ValuationResponse { valuation, equity }))
}

pub(crate) async fn compare_endpoint(
    Json(payload): Json<CompareRequest>,
) -> Result<Json<ComparisonResult>, AppError> {
    let comparison = compare(payload.property_value, payload.loan_balance)?;
    Ok(Json(comparison))
}
