// handlers/owners/update.rs - PUT /owner/:id handler

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use crate::database::models::OwnerPatch;
use crate::error::ApiError;
use crate::state::AppState;

/// PUT /owner/:id - rename an owner. Only firstName and lastName are read
/// from the body; other fields stay as stored.
pub async fn owner_update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    patch: Result<Json<OwnerPatch>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(patch) = patch?;
    state.directory.update(id, patch).await?;
    Ok(StatusCode::OK)
}
