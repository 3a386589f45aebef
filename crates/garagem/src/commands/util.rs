//! Shared helpers for command handlers.

use crate::config::Backend;
use crate::error::CliError;

/// Require an authenticated admin session for catalog mutations and the
/// lead inbox (row-level security would reject them anyway; failing early
/// gives a better message).
pub fn require_login(backend: &Backend) -> Result<(), CliError> {
    if backend.sessions.current().is_authenticated() {
        Ok(())
    } else {
        Err(CliError::NotLoggedIn)
    }
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
/// Non-interactive contexts must pass `--yes` explicitly.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::IsTerminal::is_terminal(&std::io::stdin()) {
        return Err(CliError::NonInteractiveRequiresYes {
            action: message.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}
