//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ProxyConfig (validated, immutable)
//!     → consumed once by HttpServer::new
//! ```
//!
//! Config is immutable once loaded. All fields have defaults so the proxy
//! runs without a file at all.

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    CorsConfig, CredentialConfig, LimitsConfig, ListenerConfig, LogFormat, ObservabilityConfig,
    ProxyConfig, UpstreamConfig,
};
pub use validation::{validate_config, ValidationError};
