//! Config subcommand handlers.

use dialoguer::Input;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, Profile};
use crate::error::CliError;

// ── Helpers ─────────────────────────────────────────────────────────

/// Format config for display, masking sensitive fields.
fn format_config_redacted(cfg: &Config) -> String {
    use std::fmt::Write;
    let mut out = String::new();

    if let Some(ref default) = cfg.default_profile {
        let _ = writeln!(out, "default_profile = \"{default}\"");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "[defaults]");
    let _ = writeln!(out, "output = \"{}\"", cfg.defaults.output);
    let _ = writeln!(out, "color = \"{}\"", cfg.defaults.color);
    let _ = writeln!(out, "timeout = {}", cfg.defaults.timeout);

    let mut names: Vec<_> = cfg.profiles.keys().collect();
    names.sort();
    for name in names {
        let p = &cfg.profiles[name];
        let _ = writeln!(out);
        let _ = writeln!(out, "[profiles.{name}]");
        let _ = writeln!(out, "project_url = \"{}\"", p.project_url);
        if p.anon_key.is_some() {
            let _ = writeln!(out, "anon_key = \"****\"");
        }
        if let Some(ref env) = p.anon_key_env {
            let _ = writeln!(out, "anon_key_env = \"{env}\"");
        }
        if let Some(timeout) = p.timeout {
            let _ = writeln!(out, "timeout = {timeout}");
        }
    }

    out.trim_end().to_owned()
}

fn prompt(label: &str, initial: Option<String>) -> Result<String, CliError> {
    let mut input = Input::new().with_prompt(label);
    if let Some(initial) = initial {
        input = input.with_initial_text(initial);
    }
    input
        .interact_text()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            println!("{}", config::config_path().display());
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = config::load_config_or_default();
            println!("{}", format_config_redacted(&cfg));
            Ok(())
        }

        ConfigCommand::Init => {
            let mut cfg = config::load_config_or_default();
            let name = config::active_profile_name(global, &cfg);

            let existing = cfg.profiles.get(&name).cloned();
            let project_url = prompt(
                "Project URL",
                existing.as_ref().map(|p| p.project_url.clone()),
            )?;
            let _: url::Url = project_url.parse().map_err(|_| CliError::Validation {
                field: "project-url".into(),
                reason: format!("invalid URL: {project_url}"),
            })?;

            let anon_key = prompt("Anonymous key (blank to keep keyring/env)", None)?;
            let anon_key = if anon_key.is_empty() {
                existing.as_ref().and_then(|p| p.anon_key.clone())
            } else {
                Some(anon_key)
            };

            cfg.profiles.insert(
                name.clone(),
                Profile {
                    project_url,
                    anon_key,
                    anon_key_env: existing.as_ref().and_then(|p| p.anon_key_env.clone()),
                    timeout: existing.and_then(|p| p.timeout),
                },
            );
            if cfg.default_profile.is_none() {
                cfg.default_profile = Some(name.clone());
            }

            config::save_config(&cfg)?;
            if !global.quiet {
                eprintln!(
                    "Profile '{name}' written to {}",
                    config::config_path().display()
                );
            }
            Ok(())
        }
    }
}
