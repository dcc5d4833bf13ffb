// ── OAuth callback reconciliation ──
//
// Turns the `code`/`state` parameters the identity provider appended to
// the callback URL into a sign-in outcome. The backend sets the session
// cookie on success; nothing is persisted client-side.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::{debug, info, warn};
use url::Url;
use ylink_api::{OAuthCallbackQuery, routes};

use crate::error::CoreError;
use crate::resolver::{QueryHandle, ResolveOptions, Resolver};
use crate::state::{RequestState, Status};

/// Where a successful sign-in lands.
pub const HOME_PATH: &str = "/";

pub const MISSING_PARAMETERS_MESSAGE: &str =
    "Missing OAuth parameters. Please try signing in again.";
pub const PENDING_MESSAGE: &str = "Signing you in…";
pub const FINALIZING_MESSAGE: &str = "Finalizing sign-in…";
pub const FAILURE_MESSAGE: &str = "Authentication failed.";

/// Performs client-side redirects.
pub trait Navigator: Send + Sync {
    /// Replace the current location with `path` (no history entry).
    fn replace(&self, path: &str);
}

/// The two parameters the callback route requires.
pub struct CallbackParams {
    code: SecretString,
    state: String,
}

impl std::fmt::Debug for CallbackParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackParams")
            .field("code", &"[REDACTED]")
            .field("state", &self.state)
            .finish()
    }
}

impl CallbackParams {
    /// Both values must be non-empty.
    pub fn new(code: impl Into<String>, state: impl Into<String>) -> Result<Self, CoreError> {
        let code = code.into();
        let state = state.into();
        let mut missing = Vec::new();
        if code.is_empty() {
            missing.push("code");
        }
        if state.is_empty() {
            missing.push("state");
        }
        if !missing.is_empty() {
            return Err(CoreError::MissingParameters { missing });
        }
        Ok(Self {
            code: SecretString::from(code),
            state,
        })
    }

    /// Extract from decoded query pairs. The first occurrence of a name wins.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut code = None;
        let mut state = None;
        for (k, v) in pairs {
            match k.as_ref() {
                "code" if code.is_none() => code = Some(v.as_ref().to_owned()),
                "state" if state.is_none() => state = Some(v.as_ref().to_owned()),
                _ => {}
            }
        }
        Self::new(code.unwrap_or_default(), state.unwrap_or_default())
    }

    /// Extract from the full callback URL.
    pub fn from_url(url: &Url) -> Result<Self, CoreError> {
        Self::from_pairs(url.query_pairs())
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    fn to_query(&self) -> OAuthCallbackQuery {
        OAuthCallbackQuery {
            code: self.code.expose_secret().to_owned(),
            state: self.state.clone(),
        }
    }
}

/// Where a callback is in its lifecycle.
#[derive(Debug, Clone)]
pub enum CallbackState {
    /// `code` or `state` absent. Terminal; the network was never touched.
    MissingParameters,
    /// Exchange request in flight.
    Pending,
    /// Exchange answered 2xx with a JSON body.
    Success(Arc<Value>),
    /// Exchange failed (transport, status, or decode). Terminal.
    Error(Arc<ylink_api::Error>),
}

impl CallbackState {
    /// Redirect target for this state, if any.
    ///
    /// Only a non-null payload whose `ok` field is not literally `false`
    /// redirects. A missing `ok` counts as success.
    pub fn redirect_target(&self) -> Option<&'static str> {
        match self {
            Self::Success(payload)
                if !payload.is_null() && payload.get("ok") != Some(&Value::Bool(false)) =>
            {
                Some(HOME_PATH)
            }
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Text shown to the user for this state.
    pub fn message(&self) -> &'static str {
        match self {
            Self::MissingParameters => MISSING_PARAMETERS_MESSAGE,
            Self::Pending => PENDING_MESSAGE,
            Self::Success(_) => FINALIZING_MESSAGE,
            Self::Error(_) => FAILURE_MESSAGE,
        }
    }
}

/// A started callback. Holds the read for the exchange request.
pub struct CallbackFlow {
    missing: Option<CoreError>,
    query: QueryHandle,
}

impl CallbackFlow {
    pub fn state(&self) -> CallbackState {
        if self.missing.is_some() {
            return CallbackState::MissingParameters;
        }
        let current = self.query.current();
        Self::map(&current)
    }

    /// Why the parameters were rejected, for MissingParameters flows.
    pub fn missing_reason(&self) -> Option<&CoreError> {
        self.missing.as_ref()
    }

    async fn settle(&self) -> CallbackState {
        if self.missing.is_some() {
            return CallbackState::MissingParameters;
        }
        let settled = self.query.settled().await;
        Self::map(&settled)
    }

    fn map(state: &RequestState) -> CallbackState {
        match state.status {
            Status::Success => state
                .data
                .clone()
                .map_or(CallbackState::Success(Arc::new(Value::Null)), CallbackState::Success),
            Status::Error => state
                .error
                .clone()
                .map_or(CallbackState::Pending, CallbackState::Error),
            Status::Idle | Status::Pending => CallbackState::Pending,
        }
    }
}

/// Drives the OAuth callback: parameters in, redirect out.
pub struct CallbackReconciler<N> {
    resolver: Resolver,
    navigator: N,
}

impl<N: Navigator> CallbackReconciler<N> {
    pub fn new(resolver: Resolver, navigator: N) -> Self {
        Self {
            resolver,
            navigator,
        }
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    /// Check parameters and, if present, start the exchange.
    ///
    /// The read is resolved in both cases; it is only enabled when both
    /// parameters are present.
    pub fn start(&self, url: &Url) -> CallbackFlow {
        self.start_params(CallbackParams::from_url(url))
    }

    /// Like [`start`](Self::start) for parameters already extracted.
    pub fn start_params(&self, params: Result<CallbackParams, CoreError>) -> CallbackFlow {
        match params {
            Ok(params) => self.start_with(Some(params), None),
            Err(e) => self.start_with(None, Some(e)),
        }
    }

    fn start_with(&self, params: Option<CallbackParams>, missing: Option<CoreError>) -> CallbackFlow {
        let enabled = params.is_some();
        let query = params.as_ref().map_or(
            OAuthCallbackQuery {
                code: String::new(),
                state: String::new(),
            },
            CallbackParams::to_query,
        );
        let resolution = self.resolver.resolve(
            &routes::GOOGLE_OAUTH_CALLBACK,
            ResolveOptions::new().query(query).enabled(enabled),
        );

        match &missing {
            Some(reason) => warn!(%reason, "OAuth callback without required parameters"),
            None => debug!("OAuth callback exchange started"),
        }

        CallbackFlow {
            missing,
            query: resolution.query,
        }
    }

    /// Wait for the exchange to settle, then redirect if it succeeded.
    pub async fn complete(&self, flow: &CallbackFlow) -> CallbackState {
        let state = flow.settle().await;
        match (&state, state.redirect_target()) {
            (_, Some(target)) => {
                info!(target, "sign-in complete, redirecting");
                self.navigator.replace(target);
            }
            (CallbackState::Success(_), None) => {
                warn!("callback answered without a usable session; not redirecting");
            }
            (CallbackState::Error(e), None) => {
                warn!(status = ?e.status(), "OAuth callback exchange failed");
            }
            _ => {}
        }
        state
    }

    /// [`start`](Self::start) followed by [`complete`](Self::complete).
    pub async fn run(&self, url: &Url) -> CallbackState {
        let flow = self.start(url);
        self.complete(&flow).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn success(payload: Value) -> CallbackState {
        CallbackState::Success(Arc::new(payload))
    }

    #[test]
    fn params_from_url() {
        let url = Url::parse("http://localhost:3000/auth/callback?code=c1&state=s1").unwrap();
        let params = CallbackParams::from_url(&url).unwrap();
        assert_eq!(params.state(), "s1");
        assert_eq!(params.to_query().code, "c1");
    }

    #[test]
    fn empty_values_count_as_missing() {
        let url = Url::parse("http://localhost:3000/auth/callback?code=&state=s1").unwrap();
        match CallbackParams::from_url(&url) {
            Err(CoreError::MissingParameters { missing }) => assert_eq!(missing, vec!["code"]),
            other => panic!("expected MissingParameters, got {other:?}"),
        }
    }

    #[test]
    fn first_occurrence_wins() {
        let params =
            CallbackParams::from_pairs([("state", "first"), ("code", "c"), ("state", "second")])
                .unwrap();
        assert_eq!(params.state(), "first");
    }

    #[test]
    fn debug_redacts_code() {
        let params = CallbackParams::new("very-secret", "s").unwrap();
        let shown = format!("{params:?}");
        assert!(!shown.contains("very-secret"));
    }

    #[test]
    fn redirect_requires_non_false_ok() {
        assert_eq!(success(json!({})).redirect_target(), Some(HOME_PATH));
        assert_eq!(success(json!({ "ok": true })).redirect_target(), Some(HOME_PATH));
        assert_eq!(success(json!({ "ok": "no" })).redirect_target(), Some(HOME_PATH));
        assert_eq!(success(json!("done")).redirect_target(), Some(HOME_PATH));
        assert_eq!(success(json!({ "ok": false })).redirect_target(), None);
        assert_eq!(success(Value::Null).redirect_target(), None);
        assert_eq!(CallbackState::MissingParameters.redirect_target(), None);
    }

    #[test]
    fn messages_per_state() {
        assert_eq!(CallbackState::MissingParameters.message(), MISSING_PARAMETERS_MESSAGE);
        assert_eq!(CallbackState::Pending.message(), PENDING_MESSAGE);
        assert_eq!(success(json!({ "ok": false })).message(), FINALIZING_MESSAGE);
        assert!(!CallbackState::Pending.is_terminal());
    }
}
