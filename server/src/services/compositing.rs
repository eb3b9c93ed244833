//! The merge job: load two uploads, apply the transform, produce a PNG.
//!
//! Decoding, compositing and encoding are CPU-bound and run on the blocking
//! pool.

use image_compositor::{CompositeError, RawTransform, TransformSpec};
use serde_json::Value;

use super::uploads::{UploadError, UploadStore};

#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    #[error("Both base and overlay images are required")]
    MissingImages,
    #[error("One or both images not found")]
    NotFound,
    #[error("{0}")]
    Transform(CompositeError),
    #[error("Error merging images: {0}")]
    Composite(#[from] CompositeError),
    #[error("Error merging images: {0}")]
    Io(#[from] std::io::Error),
    #[error("Error merging images: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl MergeError {
    pub fn status_code(&self) -> u16 {
        match self {
            Self::MissingImages | Self::Transform(_) => 400,
            Self::NotFound => 404,
            Self::Composite(e) if e.is_client_error() => 400,
            _ => 500,
        }
    }
}

impl From<UploadError> for MergeError {
    fn from(e: UploadError) -> Self {
        match e {
            UploadError::NotFound(_) => Self::NotFound,
            UploadError::Processing(e) => Self::Composite(e),
            UploadError::Io(e) => Self::Io(e),
            UploadError::EmptyFilename | UploadError::InvalidType => Self::MissingImages,
        }
    }
}

/// Parsed `/merge` request body.
#[derive(Debug, Clone)]
pub struct MergeRequest {
    pub base_image: String,
    pub overlay_image: String,
    pub transform: RawTransform,
}

impl MergeRequest {
    /// Pick the request apart by hand so that a malformed transform is
    /// reported as such rather than as a generic body rejection.
    pub fn from_json(body: &Value) -> Result<Self, MergeError> {
        let name = |key: &str| {
            body.get(key)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        let (Some(base_image), Some(overlay_image)) = (name("base_image"), name("overlay_image"))
        else {
            return Err(MergeError::MissingImages);
        };

        let transform = match body.get("transform") {
            None | Some(Value::Null) => RawTransform::default(),
            Some(raw) => serde_json::from_value(raw.clone()).map_err(|e| {
                MergeError::Transform(CompositeError::InvalidTransform(e.to_string()))
            })?,
        };

        Ok(Self {
            base_image,
            overlay_image,
            transform,
        })
    }
}

/// Run the whole merge synchronously and return the encoded PNG.
pub fn merge_uploads(uploads: &UploadStore, req: &MergeRequest) -> Result<Vec<u8>, MergeError> {
    uploads.resolve(&req.base_image)?;
    uploads.resolve(&req.overlay_image)?;

    let spec = TransformSpec::from_raw(&req.transform).map_err(MergeError::Transform)?;

    let base = uploads.load(&req.base_image)?;
    let overlay = uploads.load(&req.overlay_image)?;
    let result = image_compositor::merge(&base, overlay, &spec)?;

    tracing::debug!(
        width = result.width(),
        height = result.height(),
        "Composite ready, encoding PNG"
    );
    Ok(image_compositor::encode_png(&result)?)
}

/// [`merge_uploads`] on the blocking pool.
pub async fn run_merge(uploads: UploadStore, req: MergeRequest) -> Result<Vec<u8>, MergeError> {
    tokio::task::spawn_blocking(move || merge_uploads(&uploads, &req)).await?
}
