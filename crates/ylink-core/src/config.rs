// ── Runtime client configuration ──
//
// Describes *how* to reach the backend. Never touches disk: the CLI (via
// ylink-config) constructs a `ClientConfig` and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use ylink_api::{TlsMode, TransportConfig};

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (self-signed development backends).
    DangerAcceptInvalid,
}

/// Configuration for talking to the Y backend.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base address (e.g. `http://localhost:8000`). Prepended as-is
    /// to every route path; `None` makes every request fail at send time.
    pub backend_url: Option<String>,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Per-request timeout applied by the transport.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            backend_url: None,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl ClientConfig {
    pub fn transport(&self) -> TransportConfig {
        let tls = match &self.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        };
        TransportConfig {
            tls,
            timeout: self.timeout,
            cookie_jar: None,
        }
    }
}
