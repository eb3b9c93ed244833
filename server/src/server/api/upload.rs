//! POST /upload – store a source image and return its preview.

use axum::Json;
use axum::extract::{Multipart, State};

use crate::app::SharedState;
use crate::services::uploads::UploadError;

use super::{ApiResult, err_json};

/// Multipart form field carrying the image.
const FILE_FIELD: &str = "file";

pub async fn upload_file(State(state): State<SharedState>, mut multipart: Multipart) -> ApiResult {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return Err(err_json(e.status().as_u16(), &e.body_text())),
        };
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or("").to_string();
        if filename.is_empty() {
            return Err(err_json(400, &UploadError::EmptyFilename.to_string()));
        }
        let data = field
            .bytes()
            .await
            .map_err(|e| err_json(e.status().as_u16(), &e.body_text()))?;

        let store = state.uploads().clone();
        let info = tokio::task::spawn_blocking(move || store.save(&filename, &data))
            .await
            .map_err(|e| err_json(500, &e.to_string()))?
            .map_err(|e| upload_error(&e))?;

        let body = serde_json::to_value(info).map_err(|e| err_json(500, &e.to_string()))?;
        return Ok(Json(body));
    }

    Err(err_json(400, "No file provided"))
}

fn upload_error(e: &UploadError) -> (axum::http::StatusCode, Json<serde_json::Value>) {
    let status = match e {
        UploadError::EmptyFilename | UploadError::InvalidType => 400,
        _ => 500,
    };
    err_json(status, &e.to_string())
}
