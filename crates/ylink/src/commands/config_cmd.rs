//! Config subcommand handlers.

use std::path::PathBuf;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config};
use crate::error::CliError;
use crate::output;

// ── Helpers ─────────────────────────────────────────────────────────

fn format_config(cfg: &Config) -> Result<String, CliError> {
    Ok(toml::to_string_pretty(cfg)?.trim_end().to_owned())
}

fn parse_bool(field: &str, value: &str) -> Result<bool, CliError> {
    value.parse().map_err(|_| CliError::Validation {
        field: field.into(),
        reason: format!("expected true or false, got '{value}'"),
    })
}

/// Apply `key = value` to `cfg`. An empty value clears optional keys.
fn set_value(cfg: &mut Config, key: &str, value: &str) -> Result<(), CliError> {
    match key {
        "backend_url" => {
            cfg.backend_url = (!value.is_empty()).then(|| value.to_owned());
        }
        "timeout" => {
            cfg.timeout = value.parse().map_err(|_| CliError::Validation {
                field: "timeout".into(),
                reason: format!("expected whole seconds, got '{value}'"),
            })?;
        }
        "insecure" => cfg.insecure = parse_bool("insecure", value)?,
        "ca_cert" => {
            cfg.ca_cert = (!value.is_empty()).then(|| PathBuf::from(value));
        }
        other => {
            return Err(CliError::Validation {
                field: "key".into(),
                reason: format!(
                    "unknown key '{other}' (expected backend_url, timeout, insecure, or ca_cert)"
                ),
            });
        }
    }
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Show => {
            let cfg = config::effective_config(global)?;
            // Surface validation errors here rather than on the next request.
            cfg.to_client_config()?;
            let detail = format_config(&cfg)?;
            let out = output::render_single(
                global.output,
                &cfg,
                |_| detail.clone(),
                |c| c.backend_url.clone().unwrap_or_default(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(&config::active_path(global).display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Set { key, value } => {
            let path = config::active_path(global);
            let mut cfg = config::load_config(Some(&path))?;
            set_value(&mut cfg, &key, &value)?;
            cfg.to_client_config()?;
            let written = config::save_config(&cfg, Some(&path))?;
            if !global.quiet {
                eprintln!("Saved {key} to {}", written.display());
            }
            Ok(())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn set_known_keys() {
        let mut cfg = Config::default();
        set_value(&mut cfg, "backend_url", "http://localhost:8000").unwrap();
        set_value(&mut cfg, "timeout", "5").unwrap();
        set_value(&mut cfg, "insecure", "true").unwrap();
        assert_eq!(cfg.backend_url.as_deref(), Some("http://localhost:8000"));
        assert_eq!(cfg.timeout, 5);
        assert!(cfg.insecure);

        set_value(&mut cfg, "backend_url", "").unwrap();
        assert_eq!(cfg.backend_url, None);
    }

    #[test]
    fn set_rejects_unknown_key_and_bad_values() {
        let mut cfg = Config::default();
        assert!(matches!(
            set_value(&mut cfg, "profile", "x"),
            Err(CliError::Validation { .. })
        ));
        assert!(set_value(&mut cfg, "timeout", "soon").is_err());
        assert!(set_value(&mut cfg, "insecure", "maybe").is_err());
    }
}
