//! Shared handler state and operational endpoints.

use crate::error::ApiError;
use adsim_core::config::ReportsConfig;
use adsim_generator::all_accounts;
use adsim_reporting::ReportBuilder;
use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::Json;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use utoipa::ToSchema;

/// Shared application state for REST handlers.
#[derive(Clone)]
pub struct AppState {
    pub builder: Arc<ReportBuilder>,
    pub reports: Arc<ReportsConfig>,
    pub environment: String,
    pub start_time: Instant,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub environment: String,
    pub uptime_secs: u64,
    pub cached_accounts: usize,
}

/// GET /api/v1/health: Health check endpoint.
#[utoipa::path(
    get,
    path = "/api/v1/health",
    tag = "Operations",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        environment: state.environment.clone(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        cached_accounts: state.builder.cache().len(),
    })
}

/// GET /api/v1/ready: Readiness probe.
/// Ready once the account seed table is available.
#[utoipa::path(
    get,
    path = "/api/v1/ready",
    tag = "Operations",
    responses(
        (status = 200, description = "Ready to accept traffic"),
        (status = 503, description = "Not ready"),
    )
)]
pub async fn readiness() -> StatusCode {
    if all_accounts().is_empty() {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    }
}

/// GET /api/v1/live: Liveness probe.
#[utoipa::path(
    get,
    path = "/api/v1/live",
    tag = "Operations",
    responses(
        (status = 200, description = "Process is alive"),
    )
)]
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// Fallback for unknown routes.
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::not_found(format!("No route for {}", uri.path()))
}
