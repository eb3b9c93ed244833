//! REST API handlers.

pub mod default_image;
pub mod download;
pub mod merge;
pub mod upload;

use axum::Json;
use axum::http::StatusCode;
use serde_json::{Value, json};

/// Handler result for JSON endpoints.
pub type ApiResult = Result<Json<Value>, (StatusCode, Json<Value>)>;

/// Standard error response.
pub fn err_json(status: u16, message: &str) -> (StatusCode, Json<Value>) {
    (
        StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(json!({ "status": "error", "error": message })),
    )
}

#[cfg(test)]
pub(crate) mod test_util {
    use axum::body::to_bytes;
    use axum::response::{IntoResponse, Response};
    use serde_json::Value;

    /// Status and JSON body of any handler outcome.
    pub async fn json_of(response: impl IntoResponse) -> (u16, Value) {
        let response: Response = response.into_response();
        let status = response.status().as_u16();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }
}
