//! Merged output storage with auto-deletion.

use std::path::PathBuf;
use std::time::Duration;

use uuid::Uuid;

use super::filename::is_plain_name;

#[derive(Debug, thiserror::Error)]
pub enum MergedStoreError {
    #[error("File not found: {0}")]
    NotFound(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone)]
pub struct MergedStore {
    temp_dir: PathBuf,
    ttl: Option<Duration>,
}

impl MergedStore {
    /// `ttl_secs == 0` disables auto-deletion.
    pub fn new(temp_dir: PathBuf, ttl_secs: u64) -> Self {
        let ttl = (ttl_secs > 0).then(|| Duration::from_secs(ttl_secs));
        Self { temp_dir, ttl }
    }

    /// Write a merged PNG, schedule its deletion and return its download name.
    pub async fn save(&self, png: &[u8]) -> Result<String, MergedStoreError> {
        tokio::fs::create_dir_all(&self.temp_dir).await?;

        let filename = format!("{}_merged.png", Uuid::new_v4());
        let path = self.temp_dir.join(&filename);
        tokio::fs::write(&path, png).await?;

        if let Some(ttl) = self.ttl {
            let del_path = path.clone();
            let del_name = filename.clone();
            tokio::spawn(async move {
                tokio::time::sleep(ttl).await;
                match tokio::fs::remove_file(&del_path).await {
                    Ok(()) => tracing::info!(filename = %del_name, "Merged image auto-deleted"),
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                    Err(e) => tracing::warn!(filename = %del_name, "Failed to delete merged image: {e}"),
                }
            });
        }

        tracing::info!(filename = %filename, bytes = png.len(), "Merged image saved");
        Ok(filename)
    }

    /// Path of a stored merged image.
    pub fn path_for(&self, filename: &str) -> Result<PathBuf, MergedStoreError> {
        if !is_plain_name(filename) {
            return Err(MergedStoreError::NotFound(filename.to_string()));
        }
        let path = self.temp_dir.join(filename);
        if !path.is_file() {
            return Err(MergedStoreError::NotFound(filename.to_string()));
        }
        Ok(path)
    }

    pub async fn read(&self, filename: &str) -> Result<Vec<u8>, MergedStoreError> {
        let path = self.path_for(filename)?;
        Ok(tokio::fs::read(path).await?)
    }
}
