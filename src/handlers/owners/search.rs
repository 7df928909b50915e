// handlers/owners/search.rs - GET /owner?lastName=X handler

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::database::models::Owner;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub last_name: String,
}

/// GET /owner?lastName=X - exact last-name match, possibly empty
pub async fn owners_search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Owner>>, ApiError> {
    let owners = state.directory.list_by_last_name(&query.last_name).await?;
    Ok(Json(owners))
}
