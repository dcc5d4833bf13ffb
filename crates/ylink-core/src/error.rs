// ── Core error types ──
//
// User-facing errors from ylink-core. The `From<ylink_api::Error>` impls
// translate transport-layer failures into domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach backend at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    // ── Request errors ───────────────────────────────────────────────
    #[error("{method} {url} failed: {status}")]
    Http {
        method: String,
        url: String,
        status: u16,
    },

    #[error("Invalid response from {url}: {message}")]
    InvalidResponse { url: String, message: String },

    // ── Sign-in errors ───────────────────────────────────────────────
    /// The OAuth callback URL lacked `code` or `state`. Never reaches the network.
    #[error("Missing OAuth parameters: {}", missing.join(", "))]
    MissingParameters { missing: Vec<&'static str> },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// HTTP status code, if the failure carried one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<&ylink_api::Error> for CoreError {
    fn from(err: &ylink_api::Error) -> Self {
        match err {
            ylink_api::Error::Configuration { url, reason } => CoreError::Config {
                message: format!("invalid request URL {url:?} ({reason}); is the backend URL set?"),
            },
            ylink_api::Error::Transport { url, source, .. } => CoreError::ConnectionFailed {
                url: url.clone(),
                reason: source.to_string(),
            },
            ylink_api::Error::Tls(msg) => CoreError::Config {
                message: format!("TLS error: {msg}"),
            },
            ylink_api::Error::Status {
                method,
                url,
                status,
            } => CoreError::Http {
                method: method.to_string(),
                url: url.clone(),
                status: *status,
            },
            ylink_api::Error::Decode { url, message, .. } => CoreError::InvalidResponse {
                url: url.clone(),
                message: message.clone(),
            },
            ylink_api::Error::Encode(e) => CoreError::Internal(format!("request body: {e}")),
        }
    }
}

impl From<ylink_api::Error> for CoreError {
    fn from(err: ylink_api::Error) -> Self {
        Self::from(&err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_keeps_code() {
        let api = ylink_api::Error::Status {
            method: ylink_api::Method::Get,
            url: "http://localhost:8000/auth/google/callback".into(),
            status: 500,
        };
        let core = CoreError::from(api);
        assert_eq!(core.status(), Some(500));
        assert_eq!(
            core.to_string(),
            "GET http://localhost:8000/auth/google/callback failed: 500"
        );
    }

    #[test]
    fn missing_parameters_lists_names() {
        let err = CoreError::MissingParameters {
            missing: vec!["code", "state"],
        };
        assert_eq!(err.to_string(), "Missing OAuth parameters: code, state");
    }
}
