// handlers/owners/list.rs - GET /owners handler

use std::sync::Arc;

use axum::{extract::State, Extension, Json};

use crate::auth::Principal;
use crate::database::models::Owner;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /owners - every owner, served from the listing cache when warm.
/// Requires one of the configured listing roles.
pub async fn owners_list(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<Arc<Vec<Owner>>>, ApiError> {
    let owners = state.directory.list_all(&principal).await?;
    Ok(Json(owners))
}
