//! HTTP server setup and request forwarding.
//!
//! # Responsibilities
//! - Build the Axum router with a catch-all proxy handler
//! - Run each request through the rewriter
//! - Forward to the upstream target via the hyper client
//! - Stream the upstream response back to the client
//! - Translate upstream transport failures into 502 responses

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::config::{ConfigError, ProxyConfig};
use crate::http::rewrite::Rewriter;

/// Application state injected into the proxy handler.
#[derive(Clone)]
struct AppState {
    rewriter: Arc<Rewriter>,
    client: Client<HttpConnector, Body>,
}

/// HTTP server forwarding every request to the fixed target.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a server from the validated configuration.
    pub fn new(config: &ProxyConfig) -> Result<Self, ConfigError> {
        let rewriter = Arc::new(Rewriter::new(config)?);
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());

        let state = AppState { rewriter, client };

        Ok(Self {
            router: Self::build_router(state),
        })
    }

    /// Build the Axum router. Every method and path goes to the proxy handler.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(proxy_handler))
            .route("/", any(proxy_handler))
            .with_state(state)
            .layer(TraceLayer::new_for_http())
    }

    /// Serve until the shutdown signal fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Draining in-flight requests");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Rewrite the request to the target and forward it.
async fn proxy_handler(
    State(state): State<AppState>,
    mut request: Request<Body>,
) -> impl IntoResponse {
    // Connections arrive over plain TCP; a secure listener would pass true.
    state.rewriter.rewrite(&mut request, false);

    match state.client.request(request).await {
        Ok(response) => {
            let (parts, body) = response.into_parts();
            Response::from_parts(parts, Body::new(body)).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Upstream request failed");
            (StatusCode::BAD_GATEWAY, "upstream request failed").into_response()
        }
    }
}
