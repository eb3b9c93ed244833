use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::config::AppConfig;
use crate::services::merged::MergedStore;
use crate::services::uploads::UploadStore;

/// Application shared state accessible from axum handlers.
#[derive(Clone)]
pub struct SharedState {
    inner: Arc<SharedStateInner>,
}

struct SharedStateInner {
    /// Application configuration (fixed at startup)
    config: AppConfig,
    /// Uploaded source images
    uploads: UploadStore,
    /// Merged outputs awaiting download
    merged: MergedStore,
    /// Cancelled on Ctrl+C to stop the HTTP server
    shutdown_token: CancellationToken,
}

impl SharedState {
    pub fn new(config: AppConfig) -> Self {
        let uploads = UploadStore::new(config.upload_dir.clone());
        let merged = MergedStore::new(config.temp_dir.clone(), config.merged_ttl_secs);

        Self {
            inner: Arc::new(SharedStateInner {
                config,
                uploads,
                merged,
                shutdown_token: CancellationToken::new(),
            }),
        }
    }

    pub fn server_port(&self) -> u16 {
        self.inner.config.server_port
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub fn uploads(&self) -> &UploadStore {
        &self.inner.uploads
    }

    pub fn merged(&self) -> &MergedStore {
        &self.inner.merged
    }

    pub fn shutdown_token(&self) -> &CancellationToken {
        &self.inner.shutdown_token
    }
}
