//! Command handlers, one module per top-level subcommand.

pub mod auth;
pub mod config_cmd;
pub mod leads;
pub mod util;
pub mod vehicles;

use crate::cli::{Command, GlobalOpts};
use crate::config::Backend;
use crate::error::CliError;

/// Route a parsed command to its handler.
pub async fn dispatch(cmd: Command, backend: &Backend, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Vehicles(args) => vehicles::handle(backend, args, global).await,
        Command::Leads(args) => leads::handle(backend, args, global).await,
        Command::Login(args) => auth::login(backend, args, global).await,
        Command::Logout => auth::logout(backend, global).await,
        // Handled before a backend is built.
        Command::Config(_) => unreachable!("config commands are dispatched in main"),
    }
}
