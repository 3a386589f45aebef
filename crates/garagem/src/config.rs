//! CLI configuration: TOML profiles, credential resolution, and backend
//! client construction.
//!
//! Anonymous keys resolve through a chain (CLI flag > profile env var >
//! system keyring > plaintext in config). Admin session tokens are
//! persisted in the keyring between invocations so `login` survives across
//! commands.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use garagem_api::{AuthClient, RestClient, TransportConfig};
use garagem_core::{CatalogStore, SessionManager};

use crate::cli::GlobalOpts;
use crate::error::CliError;

const KEYRING_SERVICE: &str = "garagem";

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named backend profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named backend profile.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Profile {
    /// Project base URL (e.g., "https://xyz.supabase.co").
    pub project_url: String,

    /// Anonymous key (plaintext -- prefer keyring or env var).
    pub anon_key: Option<String>,

    /// Environment variable name containing the anonymous key.
    pub anon_key_env: Option<String>,

    /// Override timeout.
    pub timeout: Option<u64>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "garagem", "garagem").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("garagem");
    p
}

// ── Config loading / saving ─────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, CliError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(config_path()))
        .merge(Env::prefixed("GARAGEM_CONFIG_"));

    Ok(figment.extract()?)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), CliError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)
        .map_err(|e| CliError::Internal(format!("failed to serialize config: {e}")))?;
    std::fs::write(&path, toml_str)?;
    Ok(())
}

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve the anonymous key: CLI flag > profile env var > keyring >
/// plaintext in config.
pub fn resolve_anon_key(
    profile: Option<&Profile>,
    profile_name: &str,
    global: &GlobalOpts,
) -> Result<SecretString, CliError> {
    if let Some(ref key) = global.anon_key {
        return Ok(SecretString::from(key.clone()));
    }

    if let Some(profile) = profile {
        if let Some(ref env_name) = profile.anon_key_env {
            if let Ok(val) = std::env::var(env_name) {
                return Ok(SecretString::from(val));
            }
        }

        if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/anon-key"))
        {
            if let Ok(secret) = entry.get_password() {
                return Ok(SecretString::from(secret));
            }
        }

        if let Some(ref key) = profile.anon_key {
            return Ok(SecretString::from(key.clone()));
        }
    }

    Err(CliError::NoCredentials {
        profile: profile_name.into(),
    })
}

// ── Session token persistence ───────────────────────────────────────

fn token_entry(profile_name: &str) -> Result<keyring::Entry, CliError> {
    Ok(keyring::Entry::new(
        KEYRING_SERVICE,
        &format!("{profile_name}/session-token"),
    )?)
}

/// Load the stored admin session token, if any.
pub fn load_session_token(profile_name: &str) -> Option<SecretString> {
    let entry = token_entry(profile_name).ok()?;
    entry.get_password().ok().map(SecretString::from)
}

/// Persist the admin session token across invocations.
pub fn store_session_token(profile_name: &str, token: &SecretString) -> Result<(), CliError> {
    token_entry(profile_name)?.set_password(token.expose_secret())?;
    Ok(())
}

/// Drop the stored admin session token. Missing entries are fine.
pub fn clear_session_token(profile_name: &str) -> Result<(), CliError> {
    match token_entry(profile_name)?.delete_credential() {
        Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
        Err(e) => Err(e.into()),
    }
}

// ── Backend construction ────────────────────────────────────────────

/// The connected clients a command handler works with.
pub struct Backend {
    pub store: CatalogStore,
    pub sessions: SessionManager,
    pub profile_name: String,
}

/// Build the backend clients from config + CLI flags.
pub fn build_backend(global: &GlobalOpts) -> Result<Backend, CliError> {
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);
    let profile = cfg.profiles.get(&profile_name);

    // Project URL (flag > profile); without either we cannot proceed.
    let url_str = global
        .project_url
        .as_deref()
        .or(profile.map(|p| p.project_url.as_str()))
        .ok_or_else(|| {
            if cfg.profiles.is_empty() {
                CliError::NoConfig {
                    path: config_path().display().to_string(),
                }
            } else {
                let mut names: Vec<_> = cfg.profiles.keys().cloned().collect();
                names.sort();
                CliError::ProfileNotFound {
                    name: profile_name.clone(),
                    available: names.join(", "),
                }
            }
        })?;

    let url: url::Url = url_str.parse().map_err(|_| CliError::Validation {
        field: "project-url".into(),
        reason: format!("invalid URL: {url_str}"),
    })?;

    let anon_key = resolve_anon_key(profile, &profile_name, global)?;

    let transport = TransportConfig {
        timeout: Duration::from_secs(global.timeout),
    };

    let rest = Arc::new(
        RestClient::new(url.clone(), anon_key.clone(), &transport).map_err(
            |e| CliError::Internal(format!("failed to build REST client: {e}")),
        )?,
    );
    let auth = Arc::new(AuthClient::new(url, anon_key, &transport).map_err(|e| {
        CliError::Internal(format!("failed to build auth client: {e}"))
    })?);

    Ok(Backend {
        store: CatalogStore::new(Arc::clone(&rest)),
        sessions: SessionManager::new(auth, rest),
        profile_name,
    })
}
