//! Uploaded source image storage.
//!
//! Files live flat in the upload directory as `<uuid>_<sanitized name>`.
//! Every stored file has been decoded successfully at least once. Files older
//! than the upload TTL are removed by [`UploadStore::sweep_expired`].

use std::path::PathBuf;

use image_compositor::{CompositeError, RasterBuffer};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::filename::{allowed_file, is_plain_name, secure_filename};
use super::preview::png_data_url;

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("No file selected")]
    EmptyFilename,
    #[error("Invalid file type. Please upload PNG, JPG, JPEG, or GIF files.")]
    InvalidType,
    #[error("Error processing image: {0}")]
    Processing(#[from] CompositeError),
    #[error("Upload not found: {0}")]
    NotFound(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Response payload describing a stored upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadInfo {
    pub success: bool,
    pub filename: String,
    pub width: u32,
    pub height: u32,
    /// `data:image/png;base64,...` preview.
    pub image_data: String,
}

#[derive(Debug, Clone)]
pub struct UploadStore {
    upload_dir: PathBuf,
}

impl UploadStore {
    pub fn new(upload_dir: PathBuf) -> Self {
        Self { upload_dir }
    }

    /// Validate, decode and store a client upload.
    ///
    /// Undecodable data is rejected before anything is written.
    pub fn save(&self, original_name: &str, data: &[u8]) -> Result<UploadInfo, UploadError> {
        if original_name.is_empty() {
            return Err(UploadError::EmptyFilename);
        }
        if !allowed_file(original_name) {
            return Err(UploadError::InvalidType);
        }

        let raster = image_compositor::decode(data)?;
        let stored_name = format!("{}_{}", Uuid::new_v4(), secure_filename(original_name));
        self.write(&stored_name, data)?;

        tracing::info!(
            filename = %stored_name,
            width = raster.width(),
            height = raster.height(),
            "Upload saved"
        );
        describe(stored_name, &raster)
    }

    /// Store the default base image as a fresh upload, re-encoded as PNG.
    pub fn save_default(&self, data: &[u8]) -> Result<UploadInfo, UploadError> {
        let raster = image_compositor::decode(data)?;
        let png = image_compositor::encode_rgba_png(&raster)?;
        let stored_name = format!("default_base_{}.png", Uuid::new_v4());
        self.write(&stored_name, &png)?;

        tracing::info!(filename = %stored_name, "Default base image copied to uploads");
        Ok(UploadInfo {
            success: true,
            filename: stored_name,
            width: raster.width(),
            height: raster.height(),
            image_data: png_data_url(&png),
        })
    }

    /// Path of a stored upload, if `filename` names an existing file.
    pub fn resolve(&self, filename: &str) -> Result<PathBuf, UploadError> {
        if !is_plain_name(filename) {
            return Err(UploadError::NotFound(filename.to_string()));
        }
        let path = self.upload_dir.join(filename);
        if !path.is_file() {
            return Err(UploadError::NotFound(filename.to_string()));
        }
        Ok(path)
    }

    /// Read and decode a stored upload.
    pub fn load(&self, filename: &str) -> Result<RasterBuffer, UploadError> {
        let path = self.resolve(filename)?;
        let data = std::fs::read(path)?;
        Ok(image_compositor::decode(&data)?)
    }

    /// Delete uploads whose last modification is at least `max_age_secs` old.
    ///
    /// Returns the number of files removed. A missing upload dir is empty.
    pub fn sweep_expired(&self, max_age_secs: u64) -> Result<u64, UploadError> {
        let entries = match std::fs::read_dir(&self.upload_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };
        let max_age = i64::try_from(max_age_secs).unwrap_or(i64::MAX);
        let now = chrono::Utc::now();
        let mut deleted = 0u64;

        for entry in entries {
            let entry = entry?;
            let meta = entry.metadata()?;
            if !meta.is_file() {
                continue;
            }
            let Ok(modified) = meta.modified() else {
                continue;
            };
            let modified: chrono::DateTime<chrono::Utc> = modified.into();
            if (now - modified).num_seconds() < max_age {
                continue;
            }
            match std::fs::remove_file(entry.path()) {
                Ok(()) => deleted += 1,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => tracing::warn!("Failed to delete expired upload: {e}"),
            }
        }

        if deleted > 0 {
            tracing::info!(deleted, "Expired uploads cleaned up");
        }
        Ok(deleted)
    }

    fn write(&self, stored_name: &str, data: &[u8]) -> Result<(), UploadError> {
        std::fs::create_dir_all(&self.upload_dir)?;
        std::fs::write(self.upload_dir.join(stored_name), data)?;
        Ok(())
    }
}

fn describe(filename: String, raster: &RasterBuffer) -> Result<UploadInfo, UploadError> {
    let png = image_compositor::encode_rgba_png(raster)?;
    Ok(UploadInfo {
        success: true,
        filename,
        width: raster.width(),
        height: raster.height(),
        image_data: png_data_url(&png),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{png_bytes, temp_data_dir};

    fn store() -> (UploadStore, PathBuf) {
        let dir = temp_data_dir().join("uploads");
        (UploadStore::new(dir.clone()), dir)
    }

    #[test]
    fn save_stores_prefixed_sanitized_name() {
        let (store, dir) = store();
        let info = store
            .save("my photo.PNG", &png_bytes(12, 8, [1, 2, 3, 255]))
            .unwrap();

        assert!(info.success);
        assert_eq!((info.width, info.height), (12, 8));
        assert!(info.filename.ends_with("_my_photo.PNG"), "{}", info.filename);
        assert!(info.image_data.starts_with("data:image/png;base64,"));
        assert!(dir.join(&info.filename).is_file());
    }

    #[test]
    fn save_rejects_bad_extension() {
        let err = store()
            .0
            .save("photo.bmp", &png_bytes(2, 2, [0, 0, 0, 255]))
            .unwrap_err();
        assert!(matches!(err, UploadError::InvalidType));
    }

    #[test]
    fn save_rejects_empty_name() {
        let err = store().0.save("", b"irrelevant").unwrap_err();
        assert!(matches!(err, UploadError::EmptyFilename));
    }

    #[test]
    fn undecodable_upload_leaves_no_file() {
        let (store, dir) = store();
        let err = store.save("fake.png", b"not a png").unwrap_err();
        assert!(matches!(err, UploadError::Processing(_)));
        let leftovers = std::fs::read_dir(&dir)
            .map(|entries| entries.count())
            .unwrap_or(0);
        assert_eq!(leftovers, 0);
    }

    #[test]
    fn load_round_trips_saved_upload() {
        let (store, _) = store();
        let info = store
            .save("tile.png", &png_bytes(3, 3, [9, 8, 7, 255]))
            .unwrap();
        let raster = store.load(&info.filename).unwrap();
        assert_eq!(raster.dimensions(), (3, 3));
        assert_eq!(raster.pixel(1, 1), Some([9, 8, 7, 255]));
    }

    #[test]
    fn resolve_rejects_traversal_and_missing() {
        let (store, _) = store();
        assert!(matches!(
            store.resolve("../etc/passwd"),
            Err(UploadError::NotFound(_))
        ));
        assert!(matches!(
            store.resolve("missing.png"),
            Err(UploadError::NotFound(_))
        ));
    }

    #[test]
    fn save_default_uses_default_prefix() {
        let (store, _) = store();
        let info = store.save_default(&png_bytes(5, 4, [200, 200, 200, 255])).unwrap();
        assert!(info.filename.starts_with("default_base_"));
        assert!(info.filename.ends_with(".png"));
        assert_eq!((info.width, info.height), (5, 4));
        assert!(store.resolve(&info.filename).is_ok());
    }

    #[test]
    fn sweep_keeps_fresh_uploads() {
        let (store, _) = store();
        let info = store.save("keep.png", &png_bytes(2, 2, [0, 0, 0, 255])).unwrap();
        assert_eq!(store.sweep_expired(3600).unwrap(), 0);
        assert!(store.resolve(&info.filename).is_ok());
    }

    #[test]
    fn sweep_removes_expired_uploads() {
        let (store, dir) = store();
        let a = store.save("a.png", &png_bytes(2, 2, [0, 0, 0, 255])).unwrap();
        let b = store.save_default(&png_bytes(3, 3, [9, 9, 9, 255])).unwrap();
        std::fs::create_dir_all(dir.join("nested")).unwrap();

        assert_eq!(store.sweep_expired(0).unwrap(), 2);
        assert!(store.resolve(&a.filename).is_err());
        assert!(store.resolve(&b.filename).is_err());
        assert!(dir.join("nested").is_dir());
    }

    #[test]
    fn sweep_of_missing_dir_is_noop() {
        let store = UploadStore::new(temp_data_dir().join("never-created"));
        assert_eq!(store.sweep_expired(0).unwrap(), 0);
    }
}
