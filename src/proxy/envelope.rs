//! Inbound envelope parsing.
//!
//! ```json
//! { "url": "https://...", "data": <any>, "headers": { "Name": "value" } }
//! ```
//!
//! Only presence checks happen here. The URL itself is handed to the HTTP
//! client untouched; a URL it cannot use surfaces as an upstream failure.

use axum::http::{HeaderMap, HeaderName, HeaderValue};
use serde_json::{Map, Value};

use crate::error::ProxyError;

/// A parsed forwarding request, consumed by one outbound call.
#[derive(Debug)]
pub struct Envelope {
    pub url: String,
    /// `None` when `data` was absent or `null`; the POST then has no body.
    pub data: Option<Value>,
    pub headers: HeaderMap,
}

impl Envelope {
    /// Parse the raw inbound body.
    pub fn from_slice(body: &[u8]) -> Result<Self, ProxyError> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|_| ProxyError::bad_request("Invalid JSON body"))?;

        let Value::Object(mut fields) = value else {
            return Err(ProxyError::bad_request("Request body must be a JSON object"));
        };

        let url = match fields.remove("url") {
            Some(Value::String(url)) if !url.is_empty() => url,
            Some(Value::String(_)) | Some(Value::Null) | None => {
                return Err(ProxyError::bad_request("Missing 'url' in request body"));
            }
            Some(_) => return Err(ProxyError::bad_request("'url' must be a string")),
        };

        let data = match fields.remove("data") {
            Some(Value::Null) | None => None,
            Some(data) => Some(data),
        };

        let headers = match fields.remove("headers") {
            Some(Value::Null) | None => HeaderMap::new(),
            Some(Value::Object(map)) => parse_headers(map)?,
            Some(_) => return Err(ProxyError::bad_request("'headers' must be an object")),
        };

        Ok(Self { url, data, headers })
    }
}

fn parse_headers(map: Map<String, Value>) -> Result<HeaderMap, ProxyError> {
    let mut headers = HeaderMap::with_capacity(map.len());
    for (name, value) in map {
        let Value::String(value) = value else {
            return Err(ProxyError::bad_request(format!(
                "Header '{name}' must have a string value"
            )));
        };
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| ProxyError::bad_request(format!("Invalid header name '{name}'")))?;
        let header_value = HeaderValue::from_str(&value)
            .map_err(|_| ProxyError::bad_request(format!("Invalid value for header '{name}'")))?;
        // JSON objects can carry the same name in different cases; last one wins.
        headers.insert(header_name, header_value);
    }
    Ok(headers)
}
