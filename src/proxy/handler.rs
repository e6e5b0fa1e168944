//! `POST /proxy` handler.

use std::time::Instant;

use axum::{
    body::Bytes,
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Response},
};

use crate::credential::inject_authorization;
use crate::error::ProxyError;
use crate::http::request::request_id;
use crate::http::response::RelayedResponse;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::proxy::envelope::Envelope;

/// Parse the envelope, inject the credential and forward.
///
/// The inbound content-type is ignored; the body is always read as JSON.
pub async fn proxy_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let start_time = Instant::now();
    let request_id = request_id(&headers);

    match forward(&state, &body).await {
        Ok(relayed) => {
            tracing::info!(
                request_id = %request_id,
                status = %relayed.status,
                elapsed_ms = start_time.elapsed().as_millis() as u64,
                "Relayed upstream response"
            );
            metrics::record_request("relayed", relayed.status.as_u16(), start_time);
            relayed.into_response()
        }
        Err(err) => {
            match &err {
                ProxyError::BadRequest(_) => {
                    tracing::warn!(request_id = %request_id, error = %err, "Rejected envelope")
                }
                ProxyError::UpstreamUnavailable(_) => {
                    tracing::error!(request_id = %request_id, error = %err, "Upstream error")
                }
            }
            metrics::record_request(err.kind(), err.status().as_u16(), start_time);
            err.into_response()
        }
    }
}

pub async fn forward(state: &AppState, body: &[u8]) -> Result<RelayedResponse, ProxyError> {
    let mut envelope = Envelope::from_slice(body)?;

    let injected = inject_authorization(&mut envelope.headers, state.credential.as_ref());

    tracing::debug!(
        url = %envelope.url,
        headers = envelope.headers.len(),
        has_data = envelope.data.is_some(),
        credential_injected = injected,
        "Forwarding envelope"
    );

    state.upstream.forward(envelope).await
}
