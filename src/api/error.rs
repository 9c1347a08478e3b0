//! Failure classification for outbound API calls.
//!
//! Every request resolves to the unwrapped payload or to exactly one of
//! these variants, so callers can react to expiry locally while the
//! client-level handling (notices, the expiry redirect) stays centralized.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// No HTTP response was received: DNS, connect, TLS, or the
    /// per-request timeout.
    #[error("network error: {0}")]
    Network(reqwest::Error),

    /// The server rejected the credential (HTTP 401). The coordinated
    /// session clear and redirect has already been handled by the client.
    #[error("session expired")]
    Unauthorized,

    /// Any other non-2xx status, carrying the most specific message the
    /// server supplied.
    #[error("{message}")]
    Status {
        status: StatusCode,
        message: String,
    },

    /// A 2xx response whose envelope carried a failure code.
    #[error("{0}")]
    Application(String),

    /// The response body could not be decoded into the expected shape.
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Whether this failure is the credential-expiry case, for callers
    /// that want to react to it beyond the centralized handling.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}
