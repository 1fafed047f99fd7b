//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! run():
//!     Validate config → Bind listener → Spawn serving + signal tasks
//!
//! On interrupt:
//!     signals.rs → shutdown.rs trigger → server stops accepting
//!     → in-flight requests drain → serving task returns Ok → exit 0
//!
//! On failure:
//!     Bind or server error → first real error becomes the process error
//! ```
//!
//! # Design Decisions
//! - Bind happens before any task is spawned: bind errors fail fast
//! - A shutdown-triggered clean server return is success, not an error
//! - The drain deadline is not enforced here; the operator's supervisor
//!   bounds how long draining may take

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;

use std::net::SocketAddr;

use tokio::net::TcpListener;

use crate::config::{ConfigError, ProxyConfig};
use crate::http::HttpServer;

/// Error type for the serving lifecycle.
#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Server(std::io::Error),

    #[error("failed to install signal handler: {0}")]
    Signal(std::io::Error),

    #[error("task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Bind, serve, and coordinate graceful shutdown.
///
/// Runs the serving task and the signal-watch task concurrently and returns
/// the first real error. Returns `Ok(())` when an interrupt triggered a
/// graceful shutdown and all in-flight requests drained.
pub async fn run(config: ProxyConfig) -> Result<(), ServeError> {
    let server = HttpServer::new(&config)?;

    let listener = TcpListener::bind(config.bind_address)
        .await
        .map_err(|source| ServeError::Bind {
            addr: config.bind_address,
            source,
        })?;

    tracing::info!(
        address = %config.bind_address,
        target = %config.target,
        overrides = config.overrides.len(),
        "Listening for connections"
    );

    let shutdown = Shutdown::new();
    let mut serving = tokio::spawn(server.run(listener, shutdown.subscribe()));
    let mut watching = tokio::spawn(signals::watch_interrupt(shutdown));

    tokio::select! {
        res = &mut serving => {
            // The server stopped without an interrupt; the watcher has
            // nothing left to do.
            watching.abort();
            res?.map_err(ServeError::Server)
        }
        res = &mut watching => {
            match res? {
                Ok(()) => serving.await?.map_err(ServeError::Server),
                Err(e) => {
                    serving.abort();
                    Err(ServeError::Signal(e))
                }
            }
        }
    }
}
