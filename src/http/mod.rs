//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID assigned)
//!     → cors.rs (preflight answered, headers added)
//!     → proxy::handler / health
//!     → response.rs (upstream reply → JSON)
//!     → Send to client
//! ```

pub mod cors;
pub mod request;
pub mod response;
pub mod server;

pub use request::{request_id, MakeRequestUuidV4, X_REQUEST_ID};
pub use response::RelayedResponse;
pub use server::{AppState, HttpServer};
