//! Login / logout handlers.

use dialoguer::Input;
use owo_colors::OwoColorize;
use secrecy::SecretString;

use crate::cli::{GlobalOpts, LoginArgs};
use crate::config::{self, Backend};
use crate::error::CliError;
use crate::output;

pub async fn login(backend: &Backend, args: LoginArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let email = match args.email {
        Some(email) => email,
        None => Input::new()
            .with_prompt("Email")
            .interact_text()
            .map_err(|e| CliError::Io(std::io::Error::other(e)))?,
    };

    let password = SecretString::from(
        rpassword::prompt_password("Password: ").map_err(CliError::Io)?,
    );

    let session = backend.sessions.sign_in(&email, &password).await?;

    // Persist the token so later invocations resume the session. A broken
    // keyring is not fatal for this run.
    if let Err(e) = config::store_session_token(&backend.profile_name, &session.access_token) {
        tracing::warn!(error = %e, "could not persist session token");
        if !global.quiet {
            eprintln!("Warning: session token not persisted; login lasts this invocation only");
        }
    }

    if !global.quiet {
        let who = session.user.email.as_deref().unwrap_or(&session.user.id);
        if output::should_color(&global.color) {
            eprintln!("{} signed in as {who}", "✓".green());
        } else {
            eprintln!("✓ signed in as {who}");
        }
    }
    Ok(())
}

pub async fn logout(backend: &Backend, global: &GlobalOpts) -> Result<(), CliError> {
    backend.sessions.sign_out().await;
    config::clear_session_token(&backend.profile_name)?;

    if !global.quiet {
        eprintln!("Signed out");
    }
    Ok(())
}
