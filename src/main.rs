//! CORS forwarding proxy.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────┐
//!                      │                 CORS PROXY                   │
//!                      │                                              │
//!   Browser            │  ┌──────────┐   ┌──────────┐   ┌──────────┐  │
//!   ───────────────────┼─▶│ request  │──▶│   cors   │──▶│ envelope │  │
//!   POST /proxy        │  │   id     │   │  layer   │   │  parse   │  │
//!                      │  └──────────┘   └──────────┘   └────┬─────┘  │
//!                      │                                     ▼        │
//!                      │                              ┌────────────┐  │
//!                      │                              │ credential │  │
//!                      │                              │ injection  │  │
//!                      │                              └─────┬──────┘  │
//!                      │                                    ▼         │
//!   ◀──────────────────┼──────── response.rs ◀──────── upstream.rs ◀──┼──── Upstream
//!   JSON / {"raw"}     │                                              │     API
//!                      └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use cors_proxy::config::{load_config, validate_config, ConfigError, ProxyConfig};
use cors_proxy::lifecycle::startup;
use cors_proxy::observability::logging;

#[derive(Parser)]
#[command(name = "cors-proxy", version)]
#[command(about = "Forward JSON envelopes to arbitrary upstreams with permissive CORS")]
struct Cli {
    /// Path to a TOML config file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let source = cli
        .config
        .as_ref()
        .map_or_else(|| "defaults".to_string(), |p| p.display().to_string());
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ProxyConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
        validate_config(&config).map_err(ConfigError::Validation)?;
    }

    logging::init_tracing(&config.observability);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "cors-proxy starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        connect_timeout_secs = config.upstream.connect_timeout_secs,
        timeout_secs = config.upstream.timeout_secs,
        source = %source,
        "Configuration loaded"
    );

    startup::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
