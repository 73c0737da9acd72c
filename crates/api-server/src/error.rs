//! Error envelope returned by every endpoint.

use adsim_core::AdSimError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

const INTERNAL_MESSAGE: &str = "An unexpected error occurred";

/// One problem found while validating a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldIssue {
    /// Dotted path of the offending field, e.g. `dateRange.startDate`.
    pub path: String,
    pub message: String,
}

impl FieldIssue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldIssue>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &str, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody {
                code: code.to_string(),
                message: message.into(),
                details: None,
            },
        }
    }

    pub fn validation(message: impl Into<String>, details: Vec<FieldIssue>) -> Self {
        metrics::counter!("api.validation_errors").increment(1);
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ErrorBody {
                code: "INVALID_REQUEST".to_string(),
                message: message.into(),
                details: Some(details),
            },
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", message)
    }
}

impl From<AdSimError> for ApiError {
    fn from(err: AdSimError) -> Self {
        match err {
            AdSimError::AccountNotFound(_) => Self::new(StatusCode::NOT_FOUND, err.code(), err.to_string()),
            AdSimError::InvalidRequest(ref msg) => {
                metrics::counter!("api.validation_errors").increment(1);
                Self::new(StatusCode::BAD_REQUEST, err.code(), msg.clone())
            }
            other => {
                error!(error = %other, "Request failed");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, other.code(), INTERNAL_MESSAGE)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorResponse { error: self.body })).into_response()
    }
}
