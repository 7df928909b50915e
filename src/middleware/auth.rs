use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth::Principal;
use crate::error::ApiError;
use crate::state::AppState;

/// Attaches a [`Principal`] to every request.
///
/// No Authorization header yields an anonymous principal; whether that is
/// enough is decided per operation by the access policy. A header that is
/// present but unusable is rejected here with 401.
pub async fn principal_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let principal = match extract_bearer(request.headers()).map_err(ApiError::unauthorized)? {
        Some(token) => state.tokens.verify(token).map_err(|e| {
            tracing::warn!("Rejected bearer token: {}", e);
            ApiError::unauthorized("Invalid bearer token")
        })?,
        None => Principal::anonymous(),
    };

    request.extensions_mut().insert(principal);
    Ok(next.run(request).await)
}

/// Bearer token from the Authorization header, if any
fn extract_bearer(headers: &HeaderMap) -> Result<Option<&str>, &'static str> {
    let Some(auth_header) = headers.get(axum::http::header::AUTHORIZATION) else {
        return Ok(None);
    };

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format")?;

    match auth_str.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(Some(token.trim())),
        Some(_) => Err("Empty JWT token"),
        None => Err("Authorization header must use Bearer token format"),
    }
}
