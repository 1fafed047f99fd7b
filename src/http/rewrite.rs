//! Request rewriting.
//!
//! # Responsibilities
//! - Compute the apparent original URL of the inbound request (for logging)
//! - Retarget the request URI to the fixed upstream
//! - Force the `Host` header to the target's authority
//! - Apply configured header overrides in order
//!
//! # Design Decisions
//! - All target-derived values are computed once at startup, so per-request
//!   rewriting is infallible and allocation-light
//! - Rewriting is stateless: identical inbound requests produce identical
//!   outbound requests

use std::str::FromStr;

use axum::http::uri::{Authority, PathAndQuery, Scheme, Uri};
use axum::http::{header, HeaderValue, Request};

use crate::config::{ConfigError, HeaderOverride, ProxyConfig};

/// Rewrites inbound requests to address the fixed upstream target.
pub struct Rewriter {
    target_scheme: Scheme,
    target_authority: Authority,
    target_path: String,
    target_query: Option<String>,
    host_value: HeaderValue,
    overrides: Vec<HeaderOverride>,
}

impl Rewriter {
    /// Derive the rewrite parameters from the validated configuration.
    pub fn new(config: &ProxyConfig) -> Result<Self, ConfigError> {
        let unusable = || ConfigError::UnusableTarget(config.target.to_string());

        let host = config.target.host_str().ok_or_else(unusable)?;
        let authority_str = match config.target.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        };

        let target_scheme = config.target.scheme().parse().map_err(|_| unusable())?;
        let target_authority = authority_str.parse().map_err(|_| unusable())?;
        let host_value = HeaderValue::from_str(&authority_str).map_err(|_| unusable())?;

        Ok(Self {
            target_scheme,
            target_authority,
            target_path: config.target.path().to_string(),
            target_query: config
                .target
                .query()
                .filter(|q| !q.is_empty())
                .map(str::to_string),
            host_value,
            overrides: config.overrides.clone(),
        })
    }

    /// Rewrite `req` in place to address the target.
    ///
    /// `secure` indicates the connection arrived over a secure transport; it
    /// only affects the apparent original scheme used for logging. Emits one
    /// `"<original> -> <rewritten>"` log line and returns that URL pair.
    pub fn rewrite<B>(&self, req: &mut Request<B>, secure: bool) -> (String, String) {
        let original_url = self.original_url(req, secure);

        self.retarget(req);
        let new_url = req.uri().to_string();

        tracing::info!("{original_url} -> {new_url}");

        // Upstream virtual hosting must see the target host, not whatever
        // host the client addressed.
        req.headers_mut().insert(header::HOST, self.host_value.clone());

        // Insert replaces every existing value for the name, so the last
        // override of a given name wins.
        for o in &self.overrides {
            req.headers_mut().insert(o.name.clone(), o.value.clone());
        }

        (original_url, new_url)
    }

    /// Compose the human-readable URL the client appeared to request.
    ///
    /// Scheme precedence: secure transport > `X-Forwarded-Proto` header >
    /// inbound URI scheme > `"http"`.
    fn original_url<B>(&self, req: &Request<B>, secure: bool) -> String {
        let mut scheme = "http";
        if let Some(s) = req.uri().scheme_str() {
            scheme = s;
        }
        if let Some(proto) = req
            .headers()
            .get("x-forwarded-proto")
            .and_then(|v| v.to_str().ok())
            .filter(|p| !p.is_empty())
        {
            scheme = proto;
        }
        if secure {
            scheme = "https";
        }

        let host = req
            .uri()
            .authority()
            .map(|a| a.as_str())
            .or_else(|| {
                req.headers()
                    .get(header::HOST)
                    .and_then(|v| v.to_str().ok())
            })
            .unwrap_or_default();

        let path_and_query = req
            .uri()
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/");

        format!("{scheme}://{host}{path_and_query}")
    }

    /// Replace scheme, authority, path, and query with the target's.
    fn retarget<B>(&self, req: &mut Request<B>) {
        let path = single_joining_slash(&self.target_path, req.uri().path());

        // Target query first, then the inbound query; the separator is only
        // needed when both are present.
        let inbound_query = req.uri().query().filter(|q| !q.is_empty());
        let query = match (self.target_query.as_deref(), inbound_query) {
            (None, None) => None,
            (Some(t), None) => Some(t.to_string()),
            (None, Some(r)) => Some(r.to_string()),
            (Some(t), Some(r)) => Some(format!("{t}&{r}")),
        };

        let pq_str = match query {
            Some(q) => format!("{path}?{q}"),
            None => path,
        };

        let mut parts = req.uri().clone().into_parts();
        parts.scheme = Some(self.target_scheme.clone());
        parts.authority = Some(self.target_authority.clone());
        parts.path_and_query = Some(
            PathAndQuery::from_str(&pq_str).unwrap_or_else(|_| PathAndQuery::from_static("/")),
        );

        let new_uri = Uri::from_parts(parts).unwrap_or_else(|_| req.uri().clone());
        *req.uri_mut() = new_uri;
    }
}

/// Join two URL paths with exactly one slash between them.
fn single_joining_slash(a: &str, b: &str) -> String {
    match (a.ends_with('/'), b.starts_with('/')) {
        (true, true) => format!("{a}{}", &b[1..]),
        (false, false) => format!("{a}/{b}"),
        _ => format!("{a}{b}"),
    }
}
