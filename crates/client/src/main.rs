//! cyberrip console client.
//!
//! Composition root: loads configuration, installs logging, starts the
//! runtime with the bundled canned gateway and hands control to the console.
//!
//! ```bash
//! RUST_LOG=runtime=debug cargo run -p funeral-client
//! ```

mod config;
mod console;
mod logging;

use anyhow::Result;
use funeral_runtime::{CannedGateway, Runtime};

use config::ClientConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ClientConfig::from_env();
    let _log_guard = logging::setup_logging(config.session_id.as_deref(), config.log_dir.as_deref())?;

    tracing::info!("Starting cyberrip");
    tracing::info!(
        frame_rate = config.runtime.frame_rate,
        gateway_timeout = ?config.runtime.gateway_timeout,
        seed_opening = config.runtime.seed_opening_ceremony,
        "Runtime configuration"
    );

    let runtime = Runtime::builder()
        .config(config.runtime)
        .gateway(CannedGateway::new())
        .build()
        .await?;
    tracing::info!("Runtime built successfully");

    let result = console::run(runtime.handle()).await;

    runtime.shutdown().await?;
    tracing::info!("Client shutdown complete");
    result
}
