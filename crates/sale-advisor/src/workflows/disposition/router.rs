use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use chrono::Utc;

use super::service::{AdvisoryService, AnalysisRequest};
use crate::error::AppError;
use crate::workflows::valuation::PropertyDescription;

/// Endpoints that run the full advisory flow.
pub fn advisory_router(service: Arc<AdvisoryService>) -> Router {
    Router::new()
        .route("/api/v1/sale-options/analysis", post(analysis_handler))
        .route("/api/v1/sale-options/report", post(report_handler))
        .with_state(service)
}

pub(crate) async fn analysis_handler(
    State(service): State<Arc<AdvisoryService>>,
    Json(request): Json<AnalysisRequest>,
) -> Result<Response, AppError> {
    let outcome = service.analyze(request, Utc::now()).await?;
    Ok((StatusCode::OK, Json(outcome)).into_response())
}

pub(crate) async fn report_handler(
    State(service): State<Arc<AdvisoryService>>,
    Json(property): Json<PropertyDescription>,
) -> Result<Response, AppError> {
    let report = service.report(&property, Utc::now())?;
    let disposition = format!("attachment; filename=\"{}\"", report.filename);

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, report.content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        report.bytes,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::workflows::disposition::{HttpMessagingGateway, ReportAssembler};
    use crate::workflows::valuation::ValuationEngine;

    fn router() -> Router {
        advisory_router(Arc::new(AdvisoryService::new(
            ValuationEngine::default(),
            ReportAssembler::default(),
            Arc::new(HttpMessagingGateway::disabled()),
        )))
    }

    fn analysis_request(bathrooms: f32) -> Request<Body> {
        let payload = json!({
            "property": {
                "postal_code": "75201",
                "structure": "detached_house",
                "living_area_sqft": 2000,
                "bedrooms": 3,
                "bathrooms": bathrooms,
                "condition": "good",
                "loan_balance": 300000
            },
            "contact": { "email": "owner@example.com" }
        });
        Request::builder()
            .method("POST")
            .uri("/api/v1/sale-options/analysis")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .expect("request builds")
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body collects");
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[tokio::test]
    async fn analysis_route_returns_flattened_outcome() {
        let response = router()
            .oneshot(analysis_request(2.0))
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["valuation"]["estimated_value"].as_f64(), Some(620_000.0));
        assert_eq!(body["equity"]["recommendation"], "open_market_favorable");
        assert_eq!(body["comparison"]["options"][0]["kind"], "open_market");
        assert_eq!(body["comparison"]["options"][0]["recommended"], true);
        assert!(body.get("evaluation").is_none());

        let report = &body["report"];
        assert_eq!(report["content_type"], "application/pdf");
        assert_eq!(report["page_count"], 5);
        assert!(report.get("bytes").is_none());

        assert_eq!(body["delivery"]["email_dispatched"], true);
        assert_eq!(body["delivery"]["sms_dispatched"], false);
    }

    #[tokio::test]
    async fn analysis_route_rejects_fractional_bathrooms() {
        let response = router()
            .oneshot(analysis_request(1.3))
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = json_body(response).await;
        let message = body["error"].as_str().expect("error message");
        assert!(message.contains("multiple of 0.5"));
        assert!(message.contains("check your inputs"));
    }
}
