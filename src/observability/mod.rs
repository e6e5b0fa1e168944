//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! handlers and layers produce:
//!     → logging.rs (structured log events, request ID as a field)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout (pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape), when enabled
//! ```

pub mod logging;
pub mod metrics;
