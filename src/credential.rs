//! Bearer credential injection.
//!
//! The token is read once at startup and never mutated afterwards. It is
//! stored as a ready-made `Authorization` value so a bad token fails at
//! startup instead of on every request.

use std::fmt;

use axum::http::header::{HeaderMap, HeaderValue, InvalidHeaderValue, AUTHORIZATION};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("credential is empty")]
    Empty,

    #[error("credential is not a valid header value")]
    Invalid(#[from] InvalidHeaderValue),
}

/// Process-wide bearer token.
#[derive(Clone)]
pub struct Credential {
    value: HeaderValue,
}

impl Credential {
    pub fn new(token: &str) -> Result<Self, CredentialError> {
        if token.is_empty() {
            return Err(CredentialError::Empty);
        }
        let mut value = HeaderValue::from_str(&format!("Bearer {token}"))?;
        value.set_sensitive(true);
        Ok(Self { value })
    }

    /// Read the token from the named environment variable.
    ///
    /// Unset and empty both mean "no credential".
    pub fn from_env(var: &str) -> Result<Option<Self>, CredentialError> {
        match std::env::var(var) {
            Ok(token) if !token.is_empty() => Self::new(&token).map(Some),
            _ => Ok(None),
        }
    }

    /// The full `Authorization` value, `Bearer <token>`.
    pub fn header_value(&self) -> &HeaderValue {
        &self.value
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Add `Authorization: Bearer <token>` unless the caller already sent one.
///
/// `HeaderMap` keys are lowercase-normalized, so any casing the caller used
/// ("authorization", "AUTHORIZATION", ...) matches here.
///
/// Returns whether the header was injected.
pub fn inject_authorization(headers: &mut HeaderMap, credential: Option<&Credential>) -> bool {
    match credential {
        Some(credential) if !headers.contains_key(AUTHORIZATION) => {
            headers.insert(AUTHORIZATION, credential.header_value().clone());
            true
        }
        _ => false,
    }
}
