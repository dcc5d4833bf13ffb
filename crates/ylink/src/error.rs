//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with help text.

use miette::Diagnostic;
use thiserror::Error;

use ylink_config::ConfigError;
use ylink_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the backend at {url}")]
    #[diagnostic(
        code(ylink::connection_failed),
        help(
            "Check that the backend is running and reachable.\n\
             Reason: {reason}"
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Backend address is not usable")]
    #[diagnostic(
        code(ylink::backend_url),
        help(
            "{message}\n\
             Set YLINK_BACKEND_URL, pass --backend-url, or run:\n  \
             ylink config set backend_url http://localhost:8000"
        )
    )]
    BackendUrl { message: String },

    // ── Sign-in ──────────────────────────────────────────────────────
    #[error("Missing OAuth parameters. Please try signing in again.")]
    #[diagnostic(
        code(ylink::missing_parameters),
        help("Missing: {missing}. Start over with: ylink sign-in")
    )]
    MissingParameters { missing: String },

    #[error("Authentication failed.")]
    #[diagnostic(code(ylink::auth_failed), help("{reason}"))]
    AuthFailed { reason: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("{method} {url} failed: {status}")]
    #[diagnostic(code(ylink::http))]
    Http {
        method: String,
        url: String,
        status: u16,
    },

    #[error("Invalid response from {url}")]
    #[diagnostic(code(ylink::invalid_response), help("{message}"))]
    InvalidResponse { url: String, message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(ylink::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(
        code(ylink::config),
        help("Inspect the merged configuration with: ylink config show")
    )]
    Config(#[from] ConfigError),

    #[error("Internal error: {0}")]
    #[diagnostic(code(ylink::internal))]
    Internal(String),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render output: {0}")]
    #[diagnostic(code(ylink::json))]
    Json(#[from] serde_json::Error),

    #[error("Failed to render output: {0}")]
    #[diagnostic(code(ylink::toml))]
    Toml(#[from] toml::ser::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } => exit_code::AUTH,
            Self::MissingParameters { .. } | Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Config { message } => CliError::BackendUrl { message },
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed { url, reason },
            CoreError::Http {
                method,
                url,
                status,
            } => CliError::Http {
                method,
                url,
                status,
            },
            CoreError::InvalidResponse { url, message } => {
                CliError::InvalidResponse { url, message }
            }
            CoreError::MissingParameters { missing } => CliError::MissingParameters {
                missing: missing.join(", "),
            },
            CoreError::Internal(message) => CliError::Internal(message),
        }
    }
}

impl From<&ylink_api::Error> for CliError {
    fn from(err: &ylink_api::Error) -> Self {
        CoreError::from(err).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_by_category() {
        let missing = CliError::from(CoreError::MissingParameters {
            missing: vec!["code"],
        });
        assert_eq!(missing.exit_code(), exit_code::USAGE);

        let auth = CliError::AuthFailed {
            reason: "backend said no".into(),
        };
        assert_eq!(auth.exit_code(), exit_code::AUTH);

        let conn = CliError::from(CoreError::ConnectionFailed {
            url: "http://localhost:8000".into(),
            reason: "refused".into(),
        });
        assert_eq!(conn.exit_code(), exit_code::CONNECTION);

        let http = CliError::from(CoreError::Http {
            method: "GET".into(),
            url: "http://localhost:8000/auth/google/url".into(),
            status: 502,
        });
        assert_eq!(http.exit_code(), exit_code::GENERAL);
        assert_eq!(
            http.to_string(),
            "GET http://localhost:8000/auth/google/url failed: 502"
        );
    }
}
