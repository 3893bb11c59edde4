//! Route definitions

use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::get,
};
use infrastructure::ServerConfig;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

use crate::{handlers, middleware::RequestIdLayer, openapi, state::AppState};

/// Create the router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/health", get(handlers::health::health_check))
        // Catalog items
        .route(
            "/items",
            get(handlers::items::list_items).post(handlers::items::create_item),
        )
        .route(
            "/items/{id}",
            get(handlers::items::get_item)
                .put(handlers::items::update_item)
                .delete(handlers::items::delete_item),
        )
        // Fault injection
        .route("/chaos/stats", get(handlers::chaos::chaos_stats))
        // OpenAPI documentation
        .merge(openapi::create_openapi_routes())
        .with_state(state)
}

/// CORS policy for the configured origins; empty means any origin
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any)
}

/// Router plus the standard middleware stack
///
/// The request id layer is outermost so that trace spans carry the id.
pub fn create_app(state: AppState, server: &ServerConfig) -> Router {
    create_router(state)
        .layer(RequestBodyLimitLayer::new(server.max_body_size_json_bytes))
        .layer(cors_layer(&server.allowed_origins))
        .layer(TraceLayer::new_for_http())
        .layer(RequestIdLayer::new())
}
