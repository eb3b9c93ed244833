//! GET /get-default-image – seed the editor with a bundled base image.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::app::SharedState;
use crate::server::assets;

type DefaultImageResult = Result<Json<Value>, (StatusCode, Json<Value>)>;

pub async fn get_default_image(State(state): State<SharedState>) -> DefaultImageResult {
    let Some(data) = load_default_image(&state).await else {
        return Err(failure(StatusCode::NOT_FOUND, "Default image not found"));
    };

    let store = state.uploads().clone();
    let info = tokio::task::spawn_blocking(move || store.save_default(&data))
        .await
        .map_err(|e| failure(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string()))?
        .map_err(|e| failure(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string()))?;

    let body = serde_json::to_value(info)
        .map_err(|e| failure(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string()))?;
    Ok(Json(body))
}

/// Configured override path first, then the embedded image.
async fn load_default_image(state: &SharedState) -> Option<Vec<u8>> {
    match &state.config().default_base_image {
        Some(path) => match tokio::fs::read(path).await {
            Ok(data) => Some(data),
            Err(e) => {
                tracing::warn!("Default base image {} unreadable: {e}", path.display());
                None
            }
        },
        None => assets::default_base_image(),
    }
}

fn failure(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "success": false, "error": message })))
}
