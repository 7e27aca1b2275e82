//! Maps the service error taxonomy onto HTTP status codes.

use crate::service::ServiceError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

/// Response-side wrapper for [`ServiceError`].
///
/// Internal failures log their detail and return a generic body; everything
/// else echoes its message as `{ "error": ... }`.
#[derive(Debug)]
pub struct ApiError(pub ServiceError);

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        ApiError(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0 {
            ServiceError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            ServiceError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "authentication required".to_string(),
            ),
            ServiceError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ServiceError::NotFound => (StatusCode::NOT_FOUND, "not found".to_string()),
            ServiceError::Internal(msg) => {
                error!(detail = %msg, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
