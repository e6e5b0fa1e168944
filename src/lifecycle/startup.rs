//! Startup orchestration.
//!
//! Order: credential → metrics → server state → listener → signals.
//! Any failure before the listener is bound is fatal.

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::ProxyConfig;
use crate::credential::{Credential, CredentialError};
use crate::http::HttpServer;
use crate::lifecycle::{signals, Shutdown};
use crate::observability::metrics;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid credential in ${var}: {source}")]
    Credential {
        var: String,
        #[source]
        source: CredentialError,
    },

    #[error("failed to build upstream client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Bring the proxy up and serve until SIGINT/SIGTERM.
pub async fn run(config: ProxyConfig) -> Result<(), StartupError> {
    let var = config.credential.env_var.clone();
    let credential = Credential::from_env(&var)
        .map_err(|source| StartupError::Credential { var: var.clone(), source })?;

    tracing::info!(
        env_var = %var,
        configured = credential.is_some(),
        "Credential loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let address = config.listener.bind_address.clone();
    let server = HttpServer::new(config, credential)?;

    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind { address: address.clone(), source })?;

    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    signals::spawn_signal_handler(shutdown);

    server.run(listener, server_shutdown).await?;
    Ok(())
}
