use std::path::PathBuf;

use crate::config::AppConfig;

/// Determine the data directory for the application.
/// Priority: IMAGE_MERGER_DATA_DIR env var > current directory
fn data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("IMAGE_MERGER_DATA_DIR") {
        return PathBuf::from(dir);
    }
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Load .env from multiple candidate paths.
fn load_dotenv() {
    let candidates = [".env", "../.env"];
    for path in &candidates {
        if dotenvy::from_filename(path).is_ok() {
            tracing::info!("Loaded .env from: {path}");
            return;
        }
    }
    tracing::info!("No .env file found, using system environment variables");
}

/// Load config and create the storage directories (fatal on error).
pub fn init_foundation() -> Result<AppConfig, anyhow::Error> {
    load_dotenv();
    let dir = data_dir();
    let config = AppConfig::load(&dir);
    config.ensure_dirs()?;

    tracing::info!(
        port = config.server_port,
        uploads = %config.upload_dir.display(),
        temp = %config.temp_dir.display(),
        max_upload_bytes = config.max_upload_bytes,
        "Settings loaded"
    );
    Ok(config)
}
