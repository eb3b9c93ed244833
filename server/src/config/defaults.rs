//! Default values for every setting.

/// `PORT`
pub const SERVER_PORT: u16 = 5000;
/// `MAX_CONTENT_LENGTH`, 16 MiB.
pub const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;
/// `MERGED_TTL_SECS`. Merged outputs are deleted after 10 minutes.
pub const MERGED_TTL_SECS: u64 = 600;
/// `UPLOAD_TTL_SECS`. Uploaded sources are swept after an hour.
pub const UPLOAD_TTL_SECS: u64 = 3600;
/// How often the upload directory is swept.
pub const UPLOAD_SWEEP_INTERVAL_SECS: u64 = 60;

/// Relative to the data dir unless `UPLOAD_FOLDER` is set.
pub const UPLOAD_SUBDIR: &str = "uploads";
/// Relative to the data dir unless `TEMP_FOLDER` is set.
pub const TEMP_SUBDIR: &str = "temp";

/// Environment variable keys.
pub const KEY_PORT: &str = "PORT";
pub const KEY_UPLOAD_FOLDER: &str = "UPLOAD_FOLDER";
pub const KEY_TEMP_FOLDER: &str = "TEMP_FOLDER";
pub const KEY_MAX_CONTENT_LENGTH: &str = "MAX_CONTENT_LENGTH";
pub const KEY_MERGED_TTL_SECS: &str = "MERGED_TTL_SECS";
pub const KEY_UPLOAD_TTL_SECS: &str = "UPLOAD_TTL_SECS";
pub const KEY_DEFAULT_BASE_IMAGE: &str = "DEFAULT_BASE_IMAGE";
