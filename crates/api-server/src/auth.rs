//! Mock API-key authentication.
//!
//! Any non-empty `x-api-key` header counts as authenticated. Requests are
//! never rejected; the outcome is attached to the request and echoed back
//! by the account endpoints.

use axum::extract::Request;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use serde::Serialize;
use tracing::debug;
use utoipa::ToSchema;

pub const API_KEY_HEADER: &str = "x-api-key";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct AuthStatus {
    pub authenticated: bool,
    pub message: String,
}

impl AuthStatus {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let key = headers
            .get(API_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty());

        match key {
            Some(_) => Self {
                authenticated: true,
                message: "Authenticated successfully".to_string(),
            },
            None => Self {
                authenticated: false,
                message: "Missing x-api-key header. Provide any string value to authenticate."
                    .to_string(),
            },
        }
    }
}

/// Axum middleware that records the caller's [`AuthStatus`] as a request
/// extension.
pub async fn mock_auth(mut req: Request, next: Next) -> Response {
    let status = AuthStatus::from_headers(req.headers());
    debug!(authenticated = status.authenticated, path = %req.uri().path(), "Auth checked");
    req.extensions_mut().insert(status);
    next.run(req).await
}
