/// HTTP mapping for service errors
///
/// Every failure leaves the API as a JSON envelope `{"error": {"type", "message"}}`.
/// Missing records map to 404, rule and duplicate violations to 400, deletes blocked
/// by references to 409. Storage failures are logged here and surface only as a
/// generic 500 message.

use crate::service::ServiceError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            ServiceError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            ServiceError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
            ServiceError::Duplicate(_) => (StatusCode::BAD_REQUEST, "duplicate_error"),
            ServiceError::Conflict(_) => (StatusCode::CONFLICT, "conflict"),
            ServiceError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };

        let message = match &self {
            ServiceError::Storage(error) => {
                tracing::error!("Storage failure: {}", error);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(json!({
            "error": {
                "type": error_type,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type alias for handlers
pub type ApiResult<T> = Result<T, ServiceError>;
