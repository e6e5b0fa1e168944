//! CORS forwarding proxy library.
//!
//! One endpoint, `POST /proxy`, takes a JSON envelope naming a target URL,
//! a payload and headers, forwards it as a single POST (adding a bearer
//! token when configured and not already present) and relays the reply as
//! JSON with permissive CORS headers.

pub mod config;
pub mod credential;
pub mod error;
pub mod health;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod proxy;

pub use config::ProxyConfig;
pub use credential::Credential;
pub use error::ProxyError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
