//! Speed test server.
//!
//! A static file server with network diagnostic endpoints, built with
//! Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────────────┐
//!                        │                 SPEEDTEST SERVER                  │
//!                        │                                                   │
//!     Client Request     │  ┌─────────┐    ┌──────────┐                      │
//!     ───────────────────┼─▶│  http   │───▶│ routing  │                      │
//!                        │  │ server  │    │ classify │                      │
//!                        │  └─────────┘    └────┬─────┘                      │
//!                        │         ┌────────────┼──────────────┐            │
//!                        │         ▼            ▼              ▼            │
//!                        │  ┌───────────┐ ┌───────────┐ ┌──────────────┐    │
//!                        │  │  payload  │ │   fixed   │ │ static_files │    │
//!                        │  │ streamer  │ │ ip / ping │ │   resolver   │    │
//!                        │  │           │ │  upload   │ │              │    │
//!                        │  └─────┬─────┘ └─────┬─────┘ └──────┬───────┘    │
//!     Client Response    │        └─────────────┴──────────────┘            │
//!     ◀──────────────────┼──────────────────────────────────────            │
//!                        │                                                   │
//!                        │  config · lifecycle · observability               │
//!                        └──────────────────────────────────────────────────┘
//! ```

use clap::Parser;

use speedtest_server::cli::Cli;
use speedtest_server::lifecycle::startup;
use speedtest_server::observability::logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Cli::parse().into_config()?;

    logging::init_logging(&config.observability.log_level);

    tracing::info!("speedtest-server v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address(),
        base_path = %config.static_files.base_path.display(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    startup::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
