//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, catch-all route)
//!     → rewrite.rs (retarget URI, force Host, apply overrides, log)
//!     → hyper client (forward to the fixed target)
//!     → response streamed back to the client unmodified
//! ```

pub mod rewrite;
pub mod server;

pub use rewrite::Rewriter;
pub use server::HttpServer;
