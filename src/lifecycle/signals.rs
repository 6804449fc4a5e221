//! OS signal handling.
//!
//! # Responsibilities
//! - Listen for the interrupt signal (Ctrl+C / SIGINT)
//! - Translate it into the internal shutdown broadcast
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - A failed signal registration is logged, not fatal; the proxy can
//!   still be stopped by killing the process

use crate::lifecycle::Shutdown;

/// Wait for Ctrl+C and trigger graceful shutdown.
///
/// Intended to be spawned as a background task that owns the coordinator.
pub async fn shutdown_on_ctrl_c(shutdown: Shutdown) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            tracing::info!("Shutdown signal received");
            shutdown.trigger();
        }
        Err(error) => {
            tracing::error!(error = %error, "Failed to listen for shutdown signal");
        }
    }
}
