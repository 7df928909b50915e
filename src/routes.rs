use axum::{
    http::HeaderValue,
    middleware::from_fn_with_state,
    routing::get,
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::handlers::{owners, system};
use crate::middleware::principal_middleware;
use crate::state::AppState;

/// Full application router
pub fn app(config: &AppConfig, state: AppState) -> Router {
    let owner_routes = owner_routes(state.clone());
    let owner_routes = if state.path_prefix.is_empty() {
        owner_routes
    } else {
        Router::new().nest(&state.path_prefix, owner_routes)
    };

    let router = Router::new()
        // Public
        .route("/", get(system::root))
        .route("/health", get(system::health))
        .merge(owner_routes)
        // Global middleware
        .layer(cors_layer(config));

    let router = if config.api.enable_request_logging {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    };

    router.with_state(state)
}

fn owner_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/owners", get(owners::owners_list))
        .route("/owner", get(owners::owners_search).post(owners::owner_create))
        .route(
            "/owner/:id",
            get(owners::owner_get)
                .put(owners::owner_update)
                .delete(owners::owner_delete),
        )
        .layer(from_fn_with_state(state, principal_middleware))
}

/// Configured origins only; a disabled CORS config allows none
fn cors_layer(config: &AppConfig) -> CorsLayer {
    if !config.security.enable_cors {
        return CorsLayer::new();
    }

    let origins: Vec<HeaderValue> = config
        .security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}
