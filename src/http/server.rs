//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the proxy and health handlers
//! - Wire up middleware (tracing, CORS, request ID, timeout, body limit)
//! - Bind server to listener
//! - Stop on the shutdown broadcast

use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ProxyConfig;
use crate::credential::Credential;
use crate::health::health_handler;
use crate::http::cors;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::proxy::{proxy_handler, UpstreamClient};

/// Application state injected into handlers.
///
/// Nothing in here is mutated after startup.
#[derive(Clone)]
pub struct AppState {
    pub upstream: UpstreamClient,
    pub credential: Option<Credential>,
}

/// HTTP server for the CORS proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and credential.
    pub fn new(config: ProxyConfig, credential: Option<Credential>) -> Result<Self, reqwest::Error> {
        let upstream = UpstreamClient::new(&config.upstream)?;

        let state = AppState {
            upstream,
            credential,
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ProxyConfig, state: AppState) -> Router {
        let router: Router = Router::new()
            .route("/proxy", post(proxy_handler))
            .route("/health", get(health_handler))
            .with_state(state)
            .layer(DefaultBodyLimit::max(config.limits.max_body_bytes))
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.limits.request_timeout_secs,
            )));

        let router = if config.cors.enabled {
            router.layer(cors::permissive_with_credentials())
        } else {
            router
        };

        router
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http())
            .layer(set_request_id_layer())
    }

    /// Run the server, accepting connections on the given listener until a
    /// shutdown is broadcast.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            cors = self.config.cors.enabled,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
