//! Request-level error taxonomy.
//!
//! Every failure is scoped to one request. Errors render as
//! `{"detail": "<message>"}` with the matching status code.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::error::Error as _;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProxyError {
    /// The envelope could not be used. No outbound call was made.
    #[error("{0}")]
    BadRequest(String),

    /// The upstream could not be reached or its reply could not be read.
    #[error("Upstream request failed: {0}")]
    UpstreamUnavailable(String),
}

impl ProxyError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    /// Build from a transport error, keeping the whole source chain
    /// ("error sending request ...: tcp connect error: Connection refused").
    pub fn upstream(err: &reqwest::Error) -> Self {
        let mut message = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        Self::UpstreamUnavailable(message)
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// Short label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "bad_request",
            Self::UpstreamUnavailable(_) => "upstream_unavailable",
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
