// handlers/owners/create.rs - POST /owner handler

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::database::models::NewOwner;
use crate::error::ApiError;
use crate::state::AppState;

/**
 * POST /owner - Create a new owner
 *
 * Expected Input:
 * ```json
 * {
 *   "firstName": "string",  // Required
 *   "lastName": "string",   // Required
 *   "address": "string",    // Optional
 *   "city": "string",       // Optional
 *   "telephone": "string"   // Optional
 * }
 * ```
 *
 * Responds 201 with an empty body and a Location header pointing at the
 * new record. Bodies that do not parse get a 400 INVALID_JSON error.
 */
pub async fn owner_create(
    State(state): State<AppState>,
    payload: Result<Json<NewOwner>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(payload) = payload?;
    let created = state.directory.create(payload).await?;
    let location = format!("{}/owner/{}", state.path_prefix, created.id);

    Ok((StatusCode::CREATED, [(header::LOCATION, location)]).into_response())
}
