//! OpenAPI documentation
//!
//! Serves the generated document at `/api-docs/openapi.json` and an
//! interactive Swagger UI at `/swagger-ui`.

// Allow clippy warnings from macro-generated code in utoipa derive
#![allow(clippy::needless_for_each)]

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{error::ErrorResponse, handlers, state::AppState};

/// OpenAPI documentation for the catalog service
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Play Catalog API",
        description = "Catalog of game items with optional warm-up fault injection",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    tags(
        (name = "items", description = "Catalog item management"),
        (name = "health", description = "Liveness"),
        (name = "chaos", description = "Fault injection statistics")
    ),
    paths(
        handlers::items::list_items,
        handlers::items::get_item,
        handlers::items::create_item,
        handlers::items::update_item,
        handlers::items::delete_item,
        handlers::health::health_check,
        handlers::chaos::chaos_stats,
    ),
    components(schemas(
        handlers::items::ItemResponse,
        handlers::items::ItemRequest,
        handlers::health::HealthResponse,
        handlers::chaos::ChaosStatsResponse,
        ErrorResponse,
    ))
)]
pub struct ApiDoc;

/// Routes serving the OpenAPI document and Swagger UI
pub fn create_openapi_routes() -> Router<AppState> {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
