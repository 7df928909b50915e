// handlers/owners/get.rs - GET /owner/:id handler

use axum::{
    extract::{Path, State},
    Json,
};

use crate::database::models::Owner;
use crate::error::ApiError;
use crate::state::AppState;

pub async fn owner_get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Owner>, ApiError> {
    Ok(Json(state.directory.get_by_id(id).await?))
}
