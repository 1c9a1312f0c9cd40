//! Response wrapper for successful HTTP responses.

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Status marker carried by successful bodies.
pub const STATUS_SUCCESS: &str = "success";

/// Wrapper for successful responses.
///
/// This provides symmetry with `ErrorResponse`: both carry a top-level
/// `status` field, with the payload fields flattened next to it.
///
/// # Example
///
/// ```
/// use roadroute_service_shared::ServiceResponse;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct NodesResult {
///     nodes: Vec<[f64; 2]>,
/// }
///
/// let result = NodesResult { nodes: vec![[21.0, 105.8]] };
/// let response = ServiceResponse::new(result);
/// assert_eq!(response.status, "success");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceResponse<T> {
    /// Always `"success"`.
    pub status: String,

    /// The actual response payload.
    #[serde(flatten)]
    pub data: T,
}

impl<T> ServiceResponse<T> {
    /// Create a new successful response.
    pub fn new(data: T) -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            data,
        }
    }
}

impl<T> From<T> for ServiceResponse<T> {
    fn from(data: T) -> Self {
        Self::new(data)
    }
}

/// Implement IntoResponse for axum to return ServiceResponse as HTTP responses.
impl<T: Serialize> IntoResponse for ServiceResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
