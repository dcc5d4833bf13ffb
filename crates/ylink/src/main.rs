mod cli;
mod commands;
mod config;
mod error;
mod output;

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use ylink_core::{QueryCache, Resolver};

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // No backend needed
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),
        Command::Routes => commands::routes::handle(&cli.global),
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "ylink", &mut std::io::stdout());
            Ok(())
        }

        cmd => {
            let client_config = config::client_config(&cli.global)?;
            // One cache for the lifetime of the process.
            let cache = Arc::new(QueryCache::new());
            let resolver = Resolver::from_config(&client_config, cache)?;

            tracing::debug!(command = ?cmd, "dispatching command");
            commands::dispatch(cmd, &resolver, &cli.global).await
        }
    }
}
