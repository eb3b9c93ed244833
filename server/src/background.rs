//! Background task loops: upload directory sweeping.

use std::time::Duration;

use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

use crate::app::SharedState;
use crate::config::defaults::UPLOAD_SWEEP_INTERVAL_SECS;

async fn sleep_or_cancel(token: &CancellationToken, duration: Duration) -> bool {
    tokio::select! {
        _ = token.cancelled() => true,
        _ = sleep(duration) => false,
    }
}

/// Periodically delete uploads older than `upload_ttl_secs`.
///
/// Returns immediately when the TTL is 0.
pub async fn upload_sweep_loop(state: SharedState) {
    let ttl = state.config().upload_ttl_secs;
    if ttl == 0 {
        tracing::info!("Upload sweeping disabled");
        return;
    }

    let shutdown_token = state.shutdown_token().clone();
    let interval = Duration::from_secs(UPLOAD_SWEEP_INTERVAL_SECS.min(ttl));

    loop {
        let store = state.uploads().clone();
        match tokio::task::spawn_blocking(move || store.sweep_expired(ttl)).await {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => tracing::warn!("Upload sweep failed: {e}"),
            Err(e) => tracing::warn!("Upload sweep task failed: {e}"),
        }

        if sleep_or_cancel(&shutdown_token, interval).await {
            tracing::info!("Upload sweep loop stopped (shutdown)");
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::test_support::{png_bytes, temp_data_dir};

    #[tokio::test]
    async fn disabled_ttl_returns_immediately() {
        let mut config = AppConfig::with_data_dir(&temp_data_dir());
        config.upload_ttl_secs = 0;
        let state = SharedState::new(config);
        tokio::time::timeout(Duration::from_secs(5), upload_sweep_loop(state))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn loop_sweeps_then_stops_on_shutdown() {
        let mut config = AppConfig::with_data_dir(&temp_data_dir());
        config.upload_ttl_secs = 1;
        config.ensure_dirs().unwrap();
        let state = SharedState::new(config);
        let info = state
            .uploads()
            .save("old.png", &png_bytes(2, 2, [1, 1, 1, 255]))
            .unwrap();

        let handle = tokio::spawn(upload_sweep_loop(state.clone()));
        // First pass finds a fresh file; the one a second later removes it.
        for _ in 0..50 {
            if state.uploads().resolve(&info.filename).is_err() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        assert!(state.uploads().resolve(&info.filename).is_err());

        state.shutdown_token().cancel();
        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .unwrap()
            .unwrap();
    }
}
