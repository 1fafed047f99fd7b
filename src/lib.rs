//! Single-target HTTP reverse proxy.
//!
//! # Architecture Overview
//!
//! ```text
//!                  ┌───────────────────────────────────────────────┐
//!                  │                   PROTEUS                     │
//!                  │                                               │
//!  Client Request  │  ┌─────────┐    ┌──────────┐    ┌─────────┐  │
//!  ────────────────┼─▶│  http   │───▶│ rewriter │───▶│ hyper   │──┼──▶ Target
//!                  │  │ server  │    │          │    │ client  │  │
//!  Client Response │  └─────────┘    └──────────┘    └─────────┘  │
//!  ◀───────────────┼──────────────── streamed back ───────────────┼──── Target
//!                  │                                               │
//!                  │  ┌─────────────────────────────────────────┐  │
//!                  │  │         Cross-Cutting Concerns          │  │
//!                  │  │  ┌─────────┐        ┌───────────────┐   │  │
//!                  │  │  │ config  │        │   lifecycle   │   │  │
//!                  │  │  │ (CLI)   │        │ signals/drain │   │  │
//!                  │  │  └─────────┘        └───────────────┘   │  │
//!                  │  └─────────────────────────────────────────┘  │
//!                  └───────────────────────────────────────────────┘
//! ```
//!
//! Every request is retargeted to one fixed upstream URL, the `Host` header is
//! forced to the target's authority, configured header overrides are applied,
//! and one `original -> rewritten` log line is emitted per request.

pub mod config;
pub mod http;
pub mod lifecycle;

pub use config::ProxyConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
