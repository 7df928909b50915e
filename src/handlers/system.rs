// handlers/system.rs - GET / and GET /health

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::state::AppState;

pub async fn root(State(state): State<AppState>) -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");
    let prefix = &state.path_prefix;

    Json(json!({
        "name": "Petclinic Owners API",
        "version": version,
        "endpoints": {
            "list": format!("GET {}/owners (requires listing role)", prefix),
            "search": format!("GET {}/owner?lastName=X", prefix),
            "show": format!("GET {}/owner/:id", prefix),
            "create": format!("POST {}/owner", prefix),
            "update": format!("PUT {}/owner/:id", prefix),
            "delete": format!("DELETE {}/owner/:id", prefix),
            "health": "GET /health",
        }
    }))
}

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.directory.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database": "unavailable"
                })),
            )
        }
    }
}
