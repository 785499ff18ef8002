use std::sync::Arc;

use axum::{http::StatusCode, routing::get, Json, Router};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use self::rest::{health, router as rest_router};

pub mod graphql;
pub mod rest;

use crate::infrastructure::config::Config;

/// Builds the full HTTP surface. Callers attach `Extension(Arc<AppState>)`.
pub fn build_router(config: Arc<Config>) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck))
        .nest("/api", rest_router())
        .merge(graphql::router())
        .fallback(not_found)
        .layer(cors_layer(config.as_ref()))
        .layer(TraceLayer::new_for_http())
}

pub async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({"error": "not_found"})),
    )
}

fn cors_layer(config: &Config) -> CorsLayer {
    let origin = if config.app.cors_origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(
            config
                .app
                .cors_origins
                .iter()
                .filter_map(|origin| origin.parse().ok()),
        )
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any)
}
