//! Bearer-token authentication extractor.

use crate::http::error::ApiError;
use crate::http::AppState;
use crate::service::{Principal, ServiceError};
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

/// Rejects with 401 unless the request carries a bearer token known to the
/// identity provider. Handlers that take `Auth` are authenticated; the
/// tracking route simply does not take it.
pub struct Auth(pub Principal);

#[async_trait]
impl FromRequestParts<AppState> for Auth {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, ApiError> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or(ApiError(ServiceError::Unauthorized))?;

        let principal = state
            .identity
            .authenticate(token)
            .await
            .ok_or(ApiError(ServiceError::Unauthorized))?;
        Ok(Auth(principal))
    }
}
