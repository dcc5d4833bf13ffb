//! CLI configuration: thin wrapper around `ylink_config`.
//!
//! Adds flag overrides from `GlobalOpts` on top of file + env.

use ylink_core::ClientConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use ylink_config::{Config, config_path, load_config, save_config};

/// The config file this invocation reads and writes.
pub fn active_path(global: &GlobalOpts) -> std::path::PathBuf {
    global.config.clone().unwrap_or_else(config_path)
}

/// File + env, then CLI flags on top.
pub fn effective_config(global: &GlobalOpts) -> Result<Config, CliError> {
    let mut cfg = load_config(global.config.as_deref())?;

    if let Some(ref url) = global.backend_url {
        cfg.backend_url = Some(url.clone());
    }
    if global.insecure {
        cfg.insecure = true;
    }
    if let Some(timeout) = global.timeout {
        cfg.timeout = timeout;
    }

    Ok(cfg)
}

/// Build the `ClientConfig` the resolver runs with.
pub fn client_config(global: &GlobalOpts) -> Result<ClientConfig, CliError> {
    Ok(effective_config(global)?.to_client_config()?)
}
