//! Error type shared by every compositing operation.

#[derive(Debug, thiserror::Error)]
pub enum CompositeError {
    #[error("Invalid transform: {0}")]
    InvalidTransform(String),
    #[error("Scaled overlay too large: {width}x{height}")]
    OverlayTooLarge { width: u64, height: u64 },
    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),
    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("Failed to encode image: {0}")]
    Encode(#[source] image::ImageError),
}

impl CompositeError {
    pub(crate) fn invalid_transform(msg: impl Into<String>) -> Self {
        Self::InvalidTransform(msg.into())
    }

    /// True for errors caused by user input rather than a server fault.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidTransform(_)
                | Self::OverlayTooLarge { .. }
                | Self::UnsupportedFormat(_)
                | Self::Decode(_)
        )
    }
}
