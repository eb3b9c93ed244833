use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;

use crate::app::SharedState;
use super::{api, assets};

/// Create the axum router with all routes.
pub fn create_router(state: SharedState) -> Router {
    let body_limit = state.config().max_upload_bytes;

    Router::new()
        // --- Core ---
        .route("/health", get(health_handler))
        // --- Images ---
        .route("/upload", post(api::upload::upload_file))
        .route("/merge", post(api::merge::merge_images))
        .route("/download/{filename}", get(api::download::download_file))
        .route("/get-default-image", get(api::default_image::get_default_image))
        // --- Editor UI ---
        .route("/", get(assets::index))
        .route("/static/{*path}", get(assets::static_handler))
        .fallback(assets::not_found)
        // --- Middleware ---
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_handler() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({ "status": "healthy" }))
}
