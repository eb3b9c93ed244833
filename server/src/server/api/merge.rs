//! POST /merge – composite two uploads and store the result for download.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde_json::{Value, json};

use crate::app::SharedState;
use crate::services::compositing::{self, MergeError, MergeRequest};
use crate::services::preview::png_data_url;

use super::{ApiResult, err_json};

pub async fn merge_images(
    State(state): State<SharedState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult {
    let Json(body) = payload.map_err(|e| {
        err_json(
            e.status().as_u16(),
            &format!("Error merging images: {}", e.body_text()),
        )
    })?;
    let req = MergeRequest::from_json(&body).map_err(|e| merge_error(&e))?;
    let base_name = req.base_image.clone();
    let overlay_name = req.overlay_image.clone();

    let png = compositing::run_merge(state.uploads().clone(), req)
        .await
        .map_err(|e| merge_error(&e))?;

    let download_filename = state
        .merged()
        .save(&png)
        .await
        .map_err(|e| err_json(500, &format!("Error merging images: {e}")))?;

    tracing::info!(
        base = %base_name,
        overlay = %overlay_name,
        download = %download_filename,
        "Images merged"
    );

    Ok(Json(json!({
        "success": true,
        "merged_image": png_data_url(&png),
        "download_filename": download_filename,
    })))
}

fn merge_error(e: &MergeError) -> (axum::http::StatusCode, Json<Value>) {
    if e.status_code() >= 500 {
        tracing::error!("Merge failed: {e}");
    }
    err_json(e.status_code(), &e.to_string())
}
