//! OS signal handling.
//!
//! # Responsibilities
//! - Wait for the interrupt signal (Ctrl+C / SIGINT)
//! - Translate it into the shared shutdown signal
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - Failure to install the handler is fatal; a proxy that cannot be
//!   interrupted cleanly should not keep running

use crate::lifecycle::Shutdown;

/// Wait for an interrupt and trigger graceful shutdown.
pub async fn watch_interrupt(shutdown: Shutdown) -> Result<(), std::io::Error> {
    tokio::signal::ctrl_c().await?;

    tracing::info!("Shutdown signal received");
    shutdown.trigger();
    Ok(())
}
