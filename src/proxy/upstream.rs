//! Outbound HTTP client.
//!
//! One `reqwest::Client` is built at startup and shared by all requests.
//! Each envelope produces exactly one POST; there are no retries.

use std::time::Duration;

use axum::http::header::{HeaderMap, CONTENT_TYPE};
use reqwest::{redirect::Policy, Client};

use crate::config::UpstreamConfig;
use crate::proxy::envelope::Envelope;
use crate::error::ProxyError;
use crate::http::response::RelayedResponse;

#[derive(Clone)]
pub struct UpstreamClient {
    client: Client,
    max_response_bytes: usize,
}

impl UpstreamClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self, reqwest::Error> {
        // Upstreams are always dialed directly; env proxy settings are ignored.
        // Redirects are relayed to the caller, never followed.
        let client = Client::builder()
            .no_proxy()
            .redirect(Policy::none())
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            max_response_bytes: config.max_response_bytes,
        })
    }

    /// POST the envelope to its target and translate the reply.
    pub async fn forward(&self, envelope: Envelope) -> Result<RelayedResponse, ProxyError> {
        let Envelope { url, data, headers } = envelope;

        let mut request = self.client.post(&url).headers(headers);
        if let Some(data) = &data {
            request = request.json(data);
        }

        let mut response = request.send().await.map_err(|e| ProxyError::upstream(&e))?;

        let status = response.status();
        let content_type = content_type(response.headers());

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await.map_err(|e| ProxyError::upstream(&e))? {
            if body.len() + chunk.len() > self.max_response_bytes {
                return Err(ProxyError::UpstreamUnavailable(format!(
                    "response body exceeded {} bytes",
                    self.max_response_bytes
                )));
            }
            body.extend_from_slice(&chunk);
        }

        tracing::debug!(
            url = %url,
            status = %status,
            content_type = %content_type,
            bytes = body.len(),
            "Upstream replied"
        );

        Ok(RelayedResponse::translate(status, &content_type, &body))
    }
}

/// Content-type as text. Non-ASCII bytes are replaced rather than dropping
/// the whole header, so the `application/json` match still works.
fn content_type(headers: &HeaderMap) -> String {
    headers
        .get(CONTENT_TYPE)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
        .unwrap_or_default()
}
