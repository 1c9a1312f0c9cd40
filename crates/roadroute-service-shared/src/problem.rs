//! Error envelope for HTTP responses.
//!
//! Every failed request answers with `{"status":"error","message":...}` and a
//! status code that distinguishes "no path" (404) from internal faults (500).

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use roadroute_lib::Error as LibError;

/// Status marker carried by error bodies.
pub const STATUS_ERROR: &str = "error";

/// Message used when no path connects the selected junctions.
pub const MESSAGE_PATH_NOT_FOUND: &str = "path not found";

/// JSON error body with its HTTP status.
///
/// # Example
///
/// ```
/// use roadroute_service_shared::ErrorResponse;
///
/// let error = ErrorResponse::path_not_found("no path found between 1 and 2", "req-12345");
/// assert_eq!(error.status_code().as_u16(), 404);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always `"error"`.
    pub status: String,

    /// Human-readable explanation.
    pub message: String,

    /// Correlation identifier for log lookup.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,

    #[serde(skip, default = "default_status_code")]
    code: u16,
}

fn default_status_code() -> u16 {
    StatusCode::INTERNAL_SERVER_ERROR.as_u16()
}

impl ErrorResponse {
    /// Create a new error body with the given HTTP status.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status: STATUS_ERROR.to_string(),
            message: message.into(),
            request_id: None,
            code: status.as_u16(),
        }
    }

    /// Add the request identifier for tracing.
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// HTTP status this error is sent with.
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Create a 404 Not Found error for unreachable junction pairs.
    pub fn path_not_found(detail: impl AsRef<str>, request_id: impl Into<String>) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            format!("{}: {}", MESSAGE_PATH_NOT_FOUND, detail.as_ref()),
        )
        .with_request_id(request_id)
    }

    /// Create a 500 Internal Server Error.
    pub fn internal_error(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, detail).with_request_id(request_id)
    }

    /// Create a 503 Service Unavailable error.
    pub fn service_unavailable(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, detail).with_request_id(request_id)
    }
}

impl std::fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ErrorResponse {}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(self)).into_response()
    }
}

/// Convert library errors to error responses.
///
/// The `request_id` must be provided separately since library errors don't have it.
pub fn from_lib_error(error: &LibError, request_id: &str) -> ErrorResponse {
    match error {
        LibError::PathNotFound { .. } => ErrorResponse::path_not_found(error.to_string(), request_id),
        LibError::InsufficientJunctions { .. } => {
            ErrorResponse::service_unavailable(error.to_string(), request_id)
        }
        _ => ErrorResponse::internal_error(error.to_string(), request_id),
    }
}
