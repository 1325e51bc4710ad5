//! Bearer token authentication middleware using JWT tokens

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::infrastructure::auth::JwtClaims;

/// Rejects requests without a valid bearer token
///
/// On success the decoded claims are stored in the request extensions.
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_jwt_token(request.headers())?;

    let claims = state.jwt_service.validate(&token).map_err(|e| {
        debug!(error = %e, "Rejected bearer token");
        ApiError::unauthorized("Invalid or expired token")
    })?;

    debug!(subject = %claims.subject(), "Authenticated request");

    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}

/// Extract JWT token from Authorization header
pub fn extract_jwt_token(headers: &HeaderMap) -> Result<String, ApiError> {
    if let Some(auth_header) = headers.get(header::AUTHORIZATION) {
        let auth_str = auth_header
            .to_str()
            .map_err(|_| ApiError::unauthorized("Invalid Authorization header encoding"))?;

        if let Some(token) = auth_str.strip_prefix("Bearer ") {
            let token = token.trim();
            if !token.is_empty() {
                return Ok(token.to_string());
            }
        }
    }

    Err(ApiError::unauthorized(
        "Authentication required. Provide JWT token via 'Authorization: Bearer <token>' header",
    ))
}

/// Extractor for the claims of an authenticated request
#[derive(Debug, Clone)]
pub struct Authenticated(pub JwtClaims);

impl<S> FromRequestParts<S> for Authenticated
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<JwtClaims>()
            .cloned()
            .map(Authenticated)
            .ok_or_else(|| ApiError::unauthorized("Authentication required"))
    }
}
