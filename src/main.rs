//! Space Data Proxy
//!
//! A stateless proxy backend for a space hazard dashboard, built with
//! Tokio and Axum. It fronts three public APIs (NASA NEO feed, JPL SBDB,
//! USGS earthquake catalog), normalizes their payloads into stable shapes
//! and answers with a uniform response envelope plus permissive CORS.
//!
//! # Architecture Overview
//!
//! ```text
//!                              ┌──────────────────────────────────────────────────────────┐
//!                              │                   SPACE DATA PROXY                       │
//!                              │                                                          │
//!     Browser Request          │  ┌─────────┐    ┌──────────┐    ┌──────────────┐        │
//!     ─────────────────────────┼─▶│  http   │───▶│ sources  │───▶│  upstream    │────────┼──── NASA /
//!                              │  │ server  │    │normalize │    │   client     │        │     JPL /
//!                              │  └─────────┘    └──────────┘    └──────────────┘        │     USGS
//!                              │       │                                                  │
//!     Browser Response         │       ▼                                                  │
//!     ◀────────────────────────┼── envelope + CORS headers                                │
//!                              │                                                          │
//!                              │  ┌────────────────────────────────────────────────────┐  │
//!                              │  │              Cross-Cutting Concerns                │  │
//!                              │  │  ┌─────────┐  ┌─────────────┐  ┌───────────────┐   │  │
//!                              │  │  │ config  │  │observability│  │   lifecycle   │   │  │
//!                              │  │  │         │  │ logs/metrics│  │startup/shutdwn│   │  │
//!                              │  │  └─────────┘  └─────────────┘  └───────────────┘   │  │
//!                              │  └────────────────────────────────────────────────────┘  │
//!                              └──────────────────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;

use space_data_proxy::config::{self, ProxyConfig};
use space_data_proxy::lifecycle::{signals, Shutdown};
use space_data_proxy::observability::{logging, metrics};
use space_data_proxy::HttpServer;

#[derive(Parser)]
#[command(name = "space-data-proxy")]
#[command(about = "Proxy backend for NASA, JPL and USGS dashboard data", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config: ProxyConfig = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => config::default_config()?,
    };

    logging::init_logging(&config.observability.log_level);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "space-data-proxy starting"
    );
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream_timeout_secs = config.upstream.timeout_secs,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    // Bind TCP listener
    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    // Initialize metrics exporter
    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    // Translate Ctrl+C into the shutdown broadcast
    let shutdown = Shutdown::new();
    let shutdown_rx = shutdown.subscribe();
    tokio::spawn(signals::shutdown_on_ctrl_c(shutdown));

    // Create and run HTTP server
    let server = HttpServer::new(config)?;
    server.run(listener, shutdown_rx).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
