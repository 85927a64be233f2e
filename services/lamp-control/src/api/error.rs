//! API error types and helpers.
//!
//! # Purpose and responsibility
//! Centralizes HTTP error response construction so every endpoint returns the
//! same `{"error": "<CODE>"}` body with a code derived from the status.
//!
//! # Key invariants and assumptions
//! - The code is a pure function of the status: mapped statuses get a fixed
//!   SCREAMING_SNAKE_CASE name, everything else gets `HTTP_ERROR_<status>`.
//! - Internal errors log details server-side and never leak them to clients.
use crate::api::types::ErrorResponse;
use crate::store::StoreError;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

/// Structured API error returned by handlers.
///
/// Couples an HTTP status code with the uniform JSON error body and implements
/// `IntoResponse` for Axum.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorResponse,
}

impl ApiError {
    pub fn from_status(status: StatusCode) -> Self {
        ApiError {
            status,
            body: ErrorResponse {
                error: code_for_status(status),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Map an HTTP status to its wire error code.
pub fn code_for_status(status: StatusCode) -> String {
    match status.as_u16() {
        400 => "INVALID_ARGUMENT".to_string(),
        401 => "UNAUTHORIZED".to_string(),
        403 => "FORBIDDEN".to_string(),
        404 => "NOT_FOUND".to_string(),
        405 => "METHOD_NOT_ALLOWED".to_string(),
        409 => "CONFLICT".to_string(),
        500 => "INTERNAL_SERVER_ERROR".to_string(),
        code => format!("HTTP_ERROR_{code}"),
    }
}

/// Build a 404 Not Found error.
pub fn api_not_found() -> ApiError {
    ApiError::from_status(StatusCode::NOT_FOUND)
}

/// Build a 400 error for malformed or missing request payloads.
pub fn api_invalid_argument() -> ApiError {
    ApiError::from_status(StatusCode::BAD_REQUEST)
}

/// Build a 500 Internal Server Error from a store error.
///
/// Logs the store error server-side; the client only sees the generic code.
pub fn api_internal(message: &str, err: &StoreError) -> ApiError {
    tracing::error!(error = ?err, context = message, "lamp storage error");
    ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR)
}

/// Fallback handler for unknown routes.
pub(crate) async fn unknown_route() -> ApiError {
    api_not_found()
}

/// Give bare 405 responses the uniform error body.
///
/// Axum produces method-not-allowed responses itself when a path matches but
/// the method does not, bypassing our handlers. No handler in this service
/// returns 405, so rewriting every one is safe.
pub(crate) async fn ensure_error_body(response: axum::response::Response) -> axum::response::Response {
    if response.status() == StatusCode::METHOD_NOT_ALLOWED {
        return ApiError::from_status(StatusCode::METHOD_NOT_ALLOWED).into_response();
    }
    response
}
