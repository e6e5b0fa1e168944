//! Response handling and transformation.
//!
//! The upstream reply is always relayed as JSON with the upstream status
//! code mirrored:
//! - JSON content-type and a parsable body → the body verbatim
//! - anything else (including unparsable JSON) → `{"raw": "<text>"}`
//!
//! Raw text is decoded with the content-type's `charset`, UTF-8 otherwise.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use encoding_rs::{Encoding, UTF_8};
use serde_json::{json, Value};

/// Upstream reply after translation, ready to send back to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct RelayedResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl RelayedResponse {
    pub fn translate(status: StatusCode, content_type: &str, body: &[u8]) -> Self {
        let body = if content_type.contains("application/json") {
            // A lying content-type is not an error; fall back to raw text.
            serde_json::from_slice(body).unwrap_or_else(|_| raw(content_type, body))
        } else {
            raw(content_type, body)
        };
        Self { status, body }
    }
}

fn raw(content_type: &str, body: &[u8]) -> Value {
    let encoding = charset(content_type)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .unwrap_or(UTF_8);
    let (text, _, _) = encoding.decode(body);
    json!({ "raw": text })
}

/// The `charset` parameter of a content-type, unquoted.
fn charset(content_type: &str) -> Option<&str> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        name.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches('"'))
    })
}

impl IntoResponse for RelayedResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
