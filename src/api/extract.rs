/// Request extractors reporting failures through `ServiceError`
///
/// Thin wrappers around axum's `Json` and `Path` extractors. A body that cannot be
/// read as the target record, or a path segment that is not a valid identifier,
/// becomes a 400 `validation_error` in the usual JSON error envelope instead of
/// axum's plain-text rejection.

use crate::service::ServiceError;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        FromRequest, FromRequestParts, Path, Request,
    },
    http::request::Parts,
    Json,
};

/// JSON request body
pub struct Payload<T>(pub T);

impl<S, T> FromRequest<S> for Payload<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(request, state).await.map_err(|rejection| {
            tracing::debug!("Rejected request body: {}", rejection.body_text());
            ServiceError::Validation(rejection.body_text())
        })?;
        Ok(Self(value))
    }
}

/// Path parameters
pub struct Param<T>(pub T);

impl<S, T> FromRequestParts<S> for Param<T>
where
    Path<T>: FromRequestParts<S, Rejection = PathRejection>,
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ServiceError::Validation(rejection.body_text()))?;
        Ok(Self(value))
    }
}
