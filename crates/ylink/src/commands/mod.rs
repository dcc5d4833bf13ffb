//! Command dispatch for handlers that talk to the backend.

pub mod callback;
pub mod config_cmd;
pub mod routes;
pub mod sign_in;

use ylink_core::Resolver;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

pub async fn dispatch(cmd: Command, resolver: &Resolver, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::SignIn => sign_in::handle(resolver, global).await,
        Command::Callback(args) => callback::handle(resolver, args, global).await,
        // Handled before a resolver is built
        Command::Routes | Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
