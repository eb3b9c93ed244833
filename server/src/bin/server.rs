//! Headless server binary.
//!
//! Starts the axum web server and the upload sweeper, then waits for Ctrl+C.

use tracing_subscriber::EnvFilter;

use image_merger_lib::app::SharedState;
use image_merger_lib::{background, server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting image merger");

    let config = image_merger_lib::init_foundation()?;
    let state = SharedState::new(config);

    tokio::spawn(background::upload_sweep_loop(state.clone()));

    let server_state = state.clone();
    let server_handle = tokio::spawn(async move {
        if let Err(e) = server::start_server(server_state).await {
            tracing::error!("Server failed: {e}");
        }
    });

    tracing::info!(
        port = state.server_port(),
        "Server running. Press Ctrl+C to stop."
    );

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down...");

    state.shutdown_token().cancel();
    server_handle.await?;
    Ok(())
}
