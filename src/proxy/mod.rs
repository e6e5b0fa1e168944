//! The forwarding core.
//!
//! # Data Flow
//! ```text
//! POST /proxy body
//!     → envelope.rs (parse url / data / headers, presence checks)
//!     → credential::inject_authorization (only if caller sent none)
//!     → upstream.rs (one POST, 20s connect / 60s total)
//!     → http::response (JSON passthrough or {"raw": text})
//! ```

pub mod envelope;
pub mod handler;
pub mod upstream;

pub use envelope::Envelope;
pub use handler::proxy_handler;
pub use upstream::UpstreamClient;
