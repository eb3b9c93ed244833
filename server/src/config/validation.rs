//! Setting value validation.

use super::defaults::{
    KEY_DEFAULT_BASE_IMAGE, KEY_MAX_CONTENT_LENGTH, KEY_MERGED_TTL_SECS, KEY_PORT,
    KEY_TEMP_FOLDER, KEY_UPLOAD_FOLDER, KEY_UPLOAD_TTL_SECS,
};

/// Upper bound for `MAX_CONTENT_LENGTH` (256 MiB).
const MAX_CONTENT_LENGTH_LIMIT: u64 = 256 * 1024 * 1024;
/// Upper bound for `MERGED_TTL_SECS` and `UPLOAD_TTL_SECS` (one week).
const TTL_LIMIT: u64 = 7 * 24 * 60 * 60;

/// Validate a setting value. Returns `Ok(())` if valid, or an error message.
pub fn validate_setting(key: &str, value: &str) -> Result<(), String> {
    match key {
        KEY_PORT => validate_uint_range(value, 1, u64::from(u16::MAX))?,
        KEY_MAX_CONTENT_LENGTH => validate_uint_range(value, 1, MAX_CONTENT_LENGTH_LIMIT)?,
        KEY_MERGED_TTL_SECS | KEY_UPLOAD_TTL_SECS => validate_uint_range(value, 0, TTL_LIMIT)?,
        KEY_UPLOAD_FOLDER | KEY_TEMP_FOLDER | KEY_DEFAULT_BASE_IMAGE => {
            if value.trim().is_empty() {
                return Err("must not be empty".into());
            }
        }
        _ => {}
    }
    Ok(())
}

fn validate_uint_range(value: &str, min: u64, max: u64) -> Result<(), String> {
    let v: u64 = value.trim().parse().map_err(|_| "must be a non-negative integer")?;
    if v < min || v > max {
        return Err(format!("must be between {min} and {max}"));
    }
    Ok(())
}
