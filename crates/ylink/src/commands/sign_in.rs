//! `ylink sign-in`: ask the backend for the Google authorization URL.

use ylink_api::models::OauthUrlResponse;
use ylink_api::routes;
use ylink_core::{CoreError, ResolveOptions, Resolver, Status};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

pub async fn handle(resolver: &Resolver, global: &GlobalOpts) -> Result<(), CliError> {
    let resolution = resolver.resolve(&routes::GET_OAUTH_URL, ResolveOptions::new());
    let state = resolution.query.settled().await;

    if let (Status::Error, Some(err)) = (state.status, state.error.as_deref()) {
        return Err(err.into());
    }

    let url = resolution.mutation.url().to_owned();
    let response: OauthUrlResponse = state
        .decode()
        .ok_or_else(|| CoreError::Internal("sign-in URL request never settled".into()))?
        .map_err(|e| CoreError::InvalidResponse {
            url,
            message: e.to_string(),
        })?;

    let out = output::render_single(
        global.output,
        &response,
        |r| format!("Open this URL in a browser to sign in:\n\n  {}", r.url),
        |r| r.url.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
