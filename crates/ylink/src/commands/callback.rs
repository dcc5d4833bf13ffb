//! `ylink callback`: finish the OAuth round trip.

use std::sync::OnceLock;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use ylink_api::AuthCallbackResponse;
use ylink_core::{CallbackParams, CallbackReconciler, CallbackState, CoreError, Navigator, Resolver};

use crate::cli::{CallbackArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

/// Records the redirect instead of performing one; the terminal has no history.
#[derive(Debug, Default)]
pub struct TerminalNavigator {
    target: OnceLock<String>,
}

impl TerminalNavigator {
    pub fn target(&self) -> Option<&str> {
        self.target.get().map(String::as_str)
    }
}

impl Navigator for TerminalNavigator {
    fn replace(&self, path: &str) {
        debug!(path, "navigate");
        let _ = self.target.set(path.to_owned());
    }
}

#[derive(Debug, Serialize)]
struct CallbackOutcome {
    message: &'static str,
    redirect: String,
    session: AuthCallbackResponse,
}

pub async fn handle(
    resolver: &Resolver,
    args: CallbackArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let reconciler = CallbackReconciler::new(resolver.clone(), TerminalNavigator::default());
    let color = output::should_color(global.color);

    let flow = if let Some(raw) = args.url {
        let url = Url::parse(&raw).map_err(|e| CliError::Validation {
            field: "url".into(),
            reason: e.to_string(),
        })?;
        reconciler.start(&url)
    } else {
        reconciler.start_params(CallbackParams::new(
            args.code.unwrap_or_default(),
            args.state.unwrap_or_default(),
        ))
    };

    let initial = flow.state();
    if !global.quiet && !initial.is_terminal() {
        eprintln!("{}", initial.message());
    }

    let state = reconciler.complete(&flow).await;
    match &state {
        CallbackState::MissingParameters => {
            let missing = match flow.missing_reason() {
                Some(CoreError::MissingParameters { missing }) => missing.join(", "),
                _ => "code, state".to_owned(),
            };
            Err(CliError::MissingParameters { missing })
        }

        CallbackState::Error(err) => Err(match CoreError::from(&**err) {
            core @ (CoreError::Config { .. } | CoreError::ConnectionFailed { .. }) => core.into(),
            other => CliError::AuthFailed {
                reason: other.to_string(),
            },
        }),

        CallbackState::Success(payload) => {
            let Some(target) = reconciler.navigator().target() else {
                if !global.quiet {
                    eprintln!("{}", output::status_line(state.message(), false, color));
                }
                return Err(CliError::AuthFailed {
                    reason: "The backend answered without confirming the session.".into(),
                });
            };

            let outcome = CallbackOutcome {
                message: state.message(),
                redirect: target.to_owned(),
                session: session_from(payload),
            };
            if !global.quiet {
                eprintln!("{}", output::status_line("Signed in.", true, color));
            }
            let out = output::render_single(global.output, &outcome, detail, |o| o.redirect.clone())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        CallbackState::Pending => Err(CliError::Internal("callback did not settle".into())),
    }
}

/// The redirect already happened, so an odd payload only loses the account details.
fn session_from(payload: &Value) -> AuthCallbackResponse {
    serde_json::from_value(payload.clone()).unwrap_or_else(|e| {
        warn!(error = %e, "unexpected session payload");
        AuthCallbackResponse::default()
    })
}

fn detail(outcome: &CallbackOutcome) -> String {
    let session = &outcome.session;
    let mut lines = Vec::new();
    if let Some(ref email) = session.email {
        match session.name {
            Some(ref name) => lines.push(format!("Account:  {name} <{email}>")),
            None => lines.push(format!("Account:  {email}")),
        }
    }
    if let Some(id) = session.user_id {
        lines.push(format!("User ID:  {id}"));
    }
    lines.push(format!("Redirect: {}", outcome.redirect));
    lines.join("\n")
}
