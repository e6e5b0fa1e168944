//! Configuration validation.
//!
//! Serde handles syntax; this module checks value ranges and the ordering
//! between timeouts. Every problem is reported, not just the first.

use std::fmt;
use std::net::SocketAddr;

use crate::config::schema::ProxyConfig;

/// A single semantic problem with a loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a configuration, collecting all errors.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }

    let upstream = &config.upstream;
    if upstream.connect_timeout_secs == 0 {
        errors.push(ValidationError::new("upstream.connect_timeout_secs", "must be > 0"));
    }
    if upstream.timeout_secs == 0 {
        errors.push(ValidationError::new("upstream.timeout_secs", "must be > 0"));
    }
    if upstream.connect_timeout_secs > upstream.timeout_secs {
        errors.push(ValidationError::new(
            "upstream.connect_timeout_secs",
            "must not exceed upstream.timeout_secs",
        ));
    }
    if upstream.max_response_bytes == 0 {
        errors.push(ValidationError::new("upstream.max_response_bytes", "must be > 0"));
    }

    let limits = &config.limits;
    if limits.max_body_bytes == 0 {
        errors.push(ValidationError::new("limits.max_body_bytes", "must be > 0"));
    }
    if limits.request_timeout_secs <= upstream.timeout_secs {
        errors.push(ValidationError::new(
            "limits.request_timeout_secs",
            "must exceed upstream.timeout_secs",
        ));
    }

    if config.credential.env_var.trim().is_empty() {
        errors.push(ValidationError::new("credential.env_var", "must not be empty"));
    }

    let obs = &config.observability;
    if obs.metrics_enabled && obs.metrics_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("'{}' is not a socket address", obs.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
