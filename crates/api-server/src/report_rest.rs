//! Report endpoints: a JSON-body variant and a path/query variant sharing
//! one validation and execution path.

use crate::error::{ApiError, ErrorResponse, FieldIssue};
use crate::rest::AppState;
use crate::validation::{validate_report_request, ReportParams, ReportRequest};
use adsim_core::report::{ReportQuery, ReportResponse};
use adsim_core::AdSimError;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use std::time::Instant;
use tracing::{info, warn};
use uuid::Uuid;

/// POST /api/v1/gads/reports: Generate a report from a JSON body.
#[utoipa::path(
    post,
    path = "/api/v1/gads/reports",
    tag = "Reports",
    request_body = ReportRequest,
    responses(
        (status = 200, description = "Generated report", body = ReportResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Unknown account", body = ErrorResponse),
    )
)]
pub async fn create_report(
    State(state): State<AppState>,
    body: Result<Json<ReportRequest>, JsonRejection>,
) -> Result<Json<ReportResponse>, ApiError> {
    let Json(request) = body.map_err(|rejection| {
        warn!(error = %rejection.body_text(), "Malformed report body");
        ApiError::validation(
            "Invalid request body",
            vec![FieldIssue::new("body", rejection.body_text())],
        )
    })?;

    let query = validate_report_request(request, &state.reports).map_err(|issues| {
        warn!(issues = issues.len(), "Report request validation failed");
        ApiError::validation("Invalid request body", issues)
    })?;

    run_report(&state, query).await
}

/// GET /api/v1/gads/accounts/:id/reports: Generate a report from query
/// parameters.
#[utoipa::path(
    get,
    path = "/api/v1/gads/accounts/{id}/reports",
    tag = "Reports",
    params(
        ("id" = String, Path, description = "Account id"),
        ReportParams,
    ),
    responses(
        (status = 200, description = "Generated report", body = ReportResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Unknown account", body = ErrorResponse),
    )
)]
pub async fn query_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
    params: Result<Query<ReportParams>, QueryRejection>,
) -> Result<Json<ReportResponse>, ApiError> {
    let Query(params) = params.map_err(|rejection| {
        warn!(error = %rejection.body_text(), "Malformed report query");
        ApiError::validation(
            "Invalid request parameters",
            vec![FieldIssue::new("query", rejection.body_text())],
        )
    })?;

    let (request, mut issues) = params.into_request(id);
    let query = match validate_report_request(request, &state.reports) {
        Ok(query) if issues.is_empty() => query,
        Ok(_) => return Err(ApiError::validation("Invalid request parameters", issues)),
        Err(more) => {
            issues.extend(more);
            warn!(issues = issues.len(), "Report request validation failed");
            return Err(ApiError::validation("Invalid request parameters", issues));
        }
    };

    run_report(&state, query).await
}

/// Run the CPU-bound pipeline off the async executor.
async fn run_report(state: &AppState, query: ReportQuery) -> Result<Json<ReportResponse>, ApiError> {
    let request_id = Uuid::new_v4();
    let account_id = query.account_id.clone();
    let started = Instant::now();
    info!(
        %request_id,
        account_id = %account_id,
        start = %query.start_date,
        end = %query.end_date,
        "Report requested"
    );

    let builder = state.builder.clone();
    let report = tokio::task::spawn_blocking(move || builder.build_report(&query))
        .await
        .map_err(|e| AdSimError::Internal(anyhow::anyhow!("report task failed: {e}")))??;

    info!(
        %request_id,
        account_id = %account_id,
        rows = report.rows.len(),
        total_rows = report.metadata.total_rows,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Report served"
    );
    Ok(Json(report))
}
