// handlers/owners/delete.rs - DELETE /owner/:id handler

use axum::{
    extract::{Path, State},
    http::StatusCode,
};

use crate::error::ApiError;
use crate::state::AppState;

/// DELETE /owner/:id - remove the owner together with its pets
pub async fn owner_delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.directory.delete(id).await?;
    Ok(StatusCode::OK)
}
