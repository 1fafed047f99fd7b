//! Configuration subsystem.
//!
//! # Data Flow
//! ```text
//! CLI arguments (clap)
//!     → cli.rs (parse flags & positional target)
//!     → ProxyConfig::from_cli (validate target URL, overrides, address)
//!     → ProxyConfig (validated, immutable)
//!     → shared via Arc with the server and rewriter
//! ```
//!
//! # Design Decisions
//! - Config is immutable once built; there is no reload path
//! - All validation happens before the listener binds (fail fast)
//! - Header overrides are parsed into typed header pairs at startup so
//!   per-request application cannot fail

pub mod cli;

use std::net::SocketAddr;

use axum::http::{HeaderName, HeaderValue};
use url::Url;

use crate::config::cli::Cli;

/// A single `name=value` request-header override, applied in order.
#[derive(Debug, Clone)]
pub struct HeaderOverride {
    pub name: HeaderName,
    pub value: HeaderValue,
}

/// Immutable runtime configuration, built once from the CLI.
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    /// The fixed upstream every request is forwarded to.
    pub target: Url,

    /// Header overrides, applied in the order given on the command line.
    pub overrides: Vec<HeaderOverride>,

    /// Resolved listen address.
    pub bind_address: SocketAddr,
}

/// Error type for configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid target URL '{url}': {source}")]
    InvalidTarget {
        url: String,
        source: url::ParseError,
    },

    #[error("malformed header override '{0}': expected name=value")]
    MalformedOverride(String),

    #[error("invalid header name in override '{0}'")]
    InvalidHeaderName(String),

    #[error("invalid header value in override '{0}'")]
    InvalidHeaderValue(String),

    #[error("target URL '{0}' is not a usable HTTP target")]
    UnusableTarget(String),

    #[error("invalid listen address '{0}'")]
    InvalidAddress(String),
}

impl ProxyConfig {
    /// Validate the parsed CLI arguments into a runtime configuration.
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        let target = Url::parse(&cli.target).map_err(|source| ConfigError::InvalidTarget {
            url: cli.target.clone(),
            source,
        })?;

        let overrides = parse_overrides(&cli.header)?;
        let bind_address = parse_listen_addr(&cli.addr)?;

        Ok(Self {
            target,
            overrides,
            bind_address,
        })
    }
}

/// Parse `name=value` override specs into typed header pairs.
///
/// Only the first `=` separates name from value, so values may themselves
/// contain `=`. A spec without any `=` is rejected rather than silently
/// treated as a name with an empty value.
pub fn parse_overrides(specs: &[String]) -> Result<Vec<HeaderOverride>, ConfigError> {
    specs
        .iter()
        .map(|spec| {
            let (name, value) = spec
                .split_once('=')
                .ok_or_else(|| ConfigError::MalformedOverride(spec.clone()))?;

            let name = name
                .parse::<HeaderName>()
                .map_err(|_| ConfigError::InvalidHeaderName(spec.clone()))?;
            let value = value
                .parse::<HeaderValue>()
                .map_err(|_| ConfigError::InvalidHeaderValue(spec.clone()))?;

            Ok(HeaderOverride { name, value })
        })
        .collect()
}

/// Parse a listen address, accepting the Go-style `:port` shorthand for
/// binding all interfaces.
fn parse_listen_addr(addr: &str) -> Result<SocketAddr, ConfigError> {
    let normalized = if addr.starts_with(':') {
        format!("0.0.0.0{addr}")
    } else {
        addr.to_string()
    };

    normalized
        .parse()
        .map_err(|_| ConfigError::InvalidAddress(addr.to_string()))
}
