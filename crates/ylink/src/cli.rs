//! Clap derive structures for the `ylink` CLI.
//!
//! Only depends on clap and clap_complete so `build.rs` can include it.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// ylink -- sign in to Y from the command line
#[derive(Debug, Parser)]
#[command(
    name = "ylink",
    version,
    about = "Sign in to the Y social network from the command line",
    long_about = "Talks to the Y backend the same way the web client does.\n\n\
        Prints the Google sign-in URL, completes the OAuth callback, and\n\
        lists the backend routes the client knows about.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend base address (e.g. http://localhost:8000)
    #[arg(long, short = 'b', env = "YLINK_BACKEND_URL", global = true)]
    pub backend_url: Option<String>,

    /// Config file to read instead of the default location
    #[arg(long, env = "YLINK_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "YLINK_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept invalid TLS certificates
    #[arg(long, short = 'k', env = "YLINK_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides config)
    #[arg(long, env = "YLINK_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the Google authorization URL to start signing in
    #[command(alias = "login")]
    SignIn,

    /// Complete sign-in from the URL Google redirected to
    #[command(alias = "cb")]
    Callback(CallbackArgs),

    /// List the backend routes this client knows
    Routes,

    /// Inspect and edit configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Callback ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CallbackArgs {
    /// Full callback URL, e.g. "http://localhost:3000/auth/callback?code=..&state=.."
    #[arg(conflicts_with_all = ["code", "state"])]
    pub url: Option<String>,

    /// Authorization code (instead of a URL)
    #[arg(long)]
    pub code: Option<String>,

    /// OAuth state value (instead of a URL)
    #[arg(long)]
    pub state: Option<String>,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Display the effective configuration (file, env, and flags merged)
    Show,

    /// Print the config file path
    Path,

    /// Set a value in the config file
    Set {
        /// One of: backend_url, timeout, insecure, ca_cert
        key: String,

        /// Value to set
        value: String,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
