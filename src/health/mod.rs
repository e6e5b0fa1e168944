//! Liveness probe.
//!
//! The proxy holds no backend state, so health is a constant: if this
//! handler runs, the process is up.

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct HealthStatus {
    pub status: &'static str,
    pub proxy: bool,
}

pub async fn health_handler() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        proxy: true,
    })
}
