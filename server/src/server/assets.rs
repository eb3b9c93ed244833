//! Embedded editor UI (`server/static/`) and the default base image.

use axum::extract::Path;
use axum::http::{StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use rust_embed::Embed;
use serde_json::json;

#[derive(Embed)]
#[folder = "static/"]
struct StaticAssets;

const DEFAULT_BASE_IMAGE: &str = "images/default-base.png";

/// GET / – editor page
pub async fn index() -> Response {
    serve_embedded("index.html")
}

/// GET /static/{*path}
pub async fn static_handler(Path(path): Path<String>) -> Response {
    serve_embedded(&path)
}

/// Fallback for unmatched routes.
pub async fn not_found(uri: Uri) -> Response {
    (
        StatusCode::NOT_FOUND,
        axum::Json(json!({
            "error": "Not Found",
            "path": uri.path(),
        })),
    )
        .into_response()
}

/// Bytes of the bundled default base image.
pub fn default_base_image() -> Option<Vec<u8>> {
    StaticAssets::get(DEFAULT_BASE_IMAGE).map(|file| file.data.into_owned())
}

fn serve_embedded(path: &str) -> Response {
    match StaticAssets::get(path) {
        Some(content) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, mime.as_ref())],
                content.data.to_vec(),
            )
                .into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
