use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use serde_json::json;

use super::domain::VehicleForm;
use super::pipeline::PricingPipeline;
use super::service::{ValuationError, ValuationService};

/// Estimate submission: the raw form plus an optional evaluation date.
#[derive(Debug, Default, Deserialize)]
pub struct EstimateRequest {
    #[serde(flatten)]
    pub form: VehicleForm,
    #[serde(default)]
    pub today: Option<NaiveDate>,
}

/// Router builder exposing the estimate, analytics, and form catalog endpoints.
pub fn valuation_router<P>(service: Arc<ValuationService<P>>) -> Router
where
    P: PricingPipeline + 'static,
{
    Router::new()
        .route("/api/v1/valuation/estimate", post(estimate_handler::<P>))
        .route("/api/v1/valuation/analytics", get(analytics_handler::<P>))
        .route("/api/v1/valuation/form", get(form_handler::<P>))
        .with_state(service)
}

pub(crate) async fn estimate_handler<P>(
    State(service): State<Arc<ValuationService<P>>>,
    axum::Json(request): axum::Json<EstimateRequest>,
) -> Response
where
    P: PricingPipeline + 'static,
{
    let today = request.today.unwrap_or_else(|| Local::now().date_naive());
    match service.estimate(&request.form, today) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(err) => error_response(&err),
    }
}

pub(crate) async fn analytics_handler<P>(
    State(service): State<Arc<ValuationService<P>>>,
) -> Response
where
    P: PricingPipeline + 'static,
{
    let charts = service.analytics(None, Local::now().date_naive());
    (StatusCode::OK, axum::Json(charts)).into_response()
}

pub(crate) async fn form_handler<P>(State(service): State<Arc<ValuationService<P>>>) -> Response
where
    P: PricingPipeline + 'static,
{
    (StatusCode::OK, axum::Json(service.catalog())).into_response()
}

fn error_response(err: &ValuationError) -> Response {
    let missing: Vec<&str> = match err {
        ValuationError::Validation(validation) => validation
            .missing_fields()
            .iter()
            .map(|field| field.key())
            .collect(),
        ValuationError::Pipeline(_) => Vec::new(),
    };

    let payload = json!({
        "error": err.headline(),
        "detail": err.detail(),
        "missing_fields": missing,
    });
    (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
}
