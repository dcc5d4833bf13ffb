use thiserror::Error;

use crate::route::Method;

/// Top-level error type for the `ylink-api` crate.
///
/// Every variant that comes out of a request carries the method and URL
/// that produced it. `ylink-core` maps these into user-facing states.
#[derive(Debug, Error)]
pub enum Error {
    // ── Configuration ───────────────────────────────────────────────
    /// The request URL could not be parsed, almost always because the
    /// backend base address is missing or malformed.
    #[error("Invalid request URL {url:?}: {reason}")]
    Configuration { url: String, reason: String },

    // ── Transport ───────────────────────────────────────────────────
    /// The request never produced a response (connection refused, DNS, timeout).
    #[error("{method} {url} failed: {source}")]
    Transport {
        method: Method,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The HTTP client itself could not be built (TLS roots, CA file).
    #[error("TLS error: {0}")]
    Tls(String),

    // ── HTTP ────────────────────────────────────────────────────────
    /// The backend answered with a non-2xx status.
    #[error("{method} {url} failed: {status}")]
    Status {
        method: Method,
        url: String,
        status: u16,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// The backend answered 2xx but the body is not valid JSON.
    #[error("{method} {url} returned an undecodable body: {message}")]
    Decode {
        method: Method,
        url: String,
        message: String,
        body: String,
    },

    /// The request body could not be serialized.
    #[error("Failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),
}

impl Error {
    /// HTTP status code, when the backend produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` if the failure happened before a response arrived.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}
