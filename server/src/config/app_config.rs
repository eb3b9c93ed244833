//! Runtime application configuration loaded from environment variables.

use std::path::{Path, PathBuf};

use super::defaults;
use super::validation::validate_setting;

/// Runtime configuration, built once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_port: u16,
    /// Uploaded source images.
    pub upload_dir: PathBuf,
    /// Merged PNGs awaiting download.
    pub temp_dir: PathBuf,
    /// Request body limit for uploads and merges.
    pub max_upload_bytes: usize,
    /// Seconds before a merged PNG is deleted; 0 keeps them forever.
    pub merged_ttl_secs: u64,
    /// Seconds before an uploaded source image is swept; 0 keeps them forever.
    pub upload_ttl_secs: u64,
    /// Overrides the embedded default base image.
    pub default_base_image: Option<PathBuf>,
}

impl AppConfig {
    /// Defaults rooted at `data_dir`.
    pub fn with_data_dir(data_dir: &Path) -> Self {
        Self {
            server_port: defaults::SERVER_PORT,
            upload_dir: data_dir.join(defaults::UPLOAD_SUBDIR),
            temp_dir: data_dir.join(defaults::TEMP_SUBDIR),
            max_upload_bytes: defaults::MAX_UPLOAD_BYTES,
            merged_ttl_secs: defaults::MERGED_TTL_SECS,
            upload_ttl_secs: defaults::UPLOAD_TTL_SECS,
            default_base_image: None,
        }
    }

    /// Load configuration from process environment variables.
    pub fn load(data_dir: &Path) -> Self {
        Self::from_lookup(data_dir, |key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// Invalid values are logged and replaced by their defaults.
    pub fn from_lookup(data_dir: &Path, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::with_data_dir(data_dir);
        let g = |key: &str| -> Option<String> {
            let value = lookup(key)?;
            match validate_setting(key, &value) {
                Ok(()) => Some(value.trim().to_string()),
                Err(e) => {
                    tracing::warn!("Ignoring invalid {key}={value:?}: {e}");
                    None
                }
            }
        };

        if let Some(port) = g(defaults::KEY_PORT).and_then(|v| v.parse().ok()) {
            config.server_port = port;
        }
        if let Some(dir) = g(defaults::KEY_UPLOAD_FOLDER) {
            config.upload_dir = resolve_dir(data_dir, &dir);
        }
        if let Some(dir) = g(defaults::KEY_TEMP_FOLDER) {
            config.temp_dir = resolve_dir(data_dir, &dir);
        }
        if let Some(limit) = g(defaults::KEY_MAX_CONTENT_LENGTH).and_then(|v| v.parse().ok()) {
            config.max_upload_bytes = limit;
        }
        if let Some(ttl) = g(defaults::KEY_MERGED_TTL_SECS).and_then(|v| v.parse().ok()) {
            config.merged_ttl_secs = ttl;
        }
        if let Some(ttl) = g(defaults::KEY_UPLOAD_TTL_SECS).and_then(|v| v.parse().ok()) {
            config.upload_ttl_secs = ttl;
        }
        if let Some(path) = g(defaults::KEY_DEFAULT_BASE_IMAGE) {
            config.default_base_image = Some(resolve_dir(data_dir, &path));
        }

        config
    }

    /// Create the upload and temp directories if missing.
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.upload_dir)?;
        std::fs::create_dir_all(&self.temp_dir)?;
        Ok(())
    }
}

/// Relative paths are taken relative to the data dir.
fn resolve_dir(data_dir: &Path, value: &str) -> PathBuf {
    let path = PathBuf::from(value);
    if path.is_absolute() {
        path
    } else {
        data_dir.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load_with(pairs: &[(&str, &str)]) -> AppConfig {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(Path::new("/srv/merger"), |key| env.get(key).cloned())
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let config = load_with(&[]);
        assert_eq!(config.server_port, 5000);
        assert_eq!(config.upload_dir, PathBuf::from("/srv/merger/uploads"));
        assert_eq!(config.temp_dir, PathBuf::from("/srv/merger/temp"));
        assert_eq!(config.max_upload_bytes, 16 * 1024 * 1024);
        assert_eq!(config.merged_ttl_secs, 600);
        assert_eq!(config.upload_ttl_secs, 3600);
        assert!(config.default_base_image.is_none());
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = load_with(&[
            ("PORT", "8081"),
            ("UPLOAD_FOLDER", "/var/uploads"),
            ("TEMP_FOLDER", "scratch"),
            ("MAX_CONTENT_LENGTH", "1024"),
            ("MERGED_TTL_SECS", "0"),
            ("UPLOAD_TTL_SECS", "120"),
            ("DEFAULT_BASE_IMAGE", "assets/base.png"),
        ]);
        assert_eq!(config.server_port, 8081);
        assert_eq!(config.upload_dir, PathBuf::from("/var/uploads"));
        assert_eq!(config.temp_dir, PathBuf::from("/srv/merger/scratch"));
        assert_eq!(config.max_upload_bytes, 1024);
        assert_eq!(config.merged_ttl_secs, 0);
        assert_eq!(config.upload_ttl_secs, 120);
        assert_eq!(
            config.default_base_image,
            Some(PathBuf::from("/srv/merger/assets/base.png"))
        );
    }

    #[test]
    fn invalid_values_fall_back_to_defaults() {
        let config = load_with(&[("PORT", "not-a-port"), ("MAX_CONTENT_LENGTH", "0")]);
        assert_eq!(config.server_port, 5000);
        assert_eq!(config.max_upload_bytes, 16 * 1024 * 1024);
    }
}
