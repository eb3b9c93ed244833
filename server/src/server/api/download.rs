//! GET /download/{filename} – merged PNG as an attachment.

use axum::Json;
use axum::body::Body;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::Response;
use serde_json::Value;

use crate::app::SharedState;
use crate::services::merged::MergedStoreError;

use super::err_json;

/// Name the browser saves the file under.
const DOWNLOAD_NAME: &str = "merged_image.png";

pub async fn download_file(
    State(state): State<SharedState>,
    filename: Result<Path<String>, PathRejection>,
) -> Result<Response, (StatusCode, Json<Value>)> {
    let Path(filename) = filename.map_err(|e| {
        err_json(
            e.status().as_u16(),
            &format!("Error downloading file: {}", e.body_text()),
        )
    })?;
    let data = state.merged().read(&filename).await.map_err(|e| match e {
        MergedStoreError::NotFound(_) => err_json(404, "File not found"),
        MergedStoreError::Io(e) => err_json(500, &format!("Error downloading file: {e}")),
    })?;

    Response::builder()
        .header(header::CONTENT_TYPE, "image/png")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{DOWNLOAD_NAME}\""),
        )
        .body(Body::from(data))
        .map_err(|e| err_json(500, &e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use axum::extract::FromRequestParts;
    use axum::http::Request;
    use axum::response::IntoResponse;

    use crate::server::api::test_util::json_of;
    use crate::test_support::test_state;

    #[tokio::test]
    async fn download_serves_attachment() {
        let state = test_state();
        let filename = state.merged().save(b"\x89PNG fake").await.unwrap();

        let response = download_file(State(state), Ok(Path(filename)))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"merged_image.png\""
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"\x89PNG fake");
    }

    #[tokio::test]
    async fn download_missing_is_404() {
        let state = test_state();
        let (status, body) =
            json_of(download_file(State(state), Ok(Path("missing_merged.png".to_string()))).await).await;
        assert_eq!(status, 404);
        assert_eq!(body["error"], "File not found");
    }

    #[tokio::test]
    async fn download_rejects_traversal() {
        let state = test_state();
        let (status, _) =
            json_of(download_file(State(state), Ok(Path("../uploads".to_string()))).await).await;
        assert_eq!(status, 404);
    }

    #[tokio::test]
    async fn unextractable_name_gets_json_error() {
        let state = test_state();
        let (mut parts, ()) = Request::builder()
            .uri("/download/x")
            .body(())
            .unwrap()
            .into_parts();
        // No route matched, so there are no path params to extract.
        let filename = Path::<String>::from_request_parts(&mut parts, &state).await;
        assert!(filename.is_err());

        let (status, body) = json_of(download_file(State(state), filename).await).await;
        assert!(status >= 400);
        assert_eq!(body["status"], "error");
        assert!(
            body["error"]
                .as_str()
                .unwrap()
                .starts_with("Error downloading file: ")
        );
    }
}
