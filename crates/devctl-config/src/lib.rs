//! Shared configuration for the device console CLI.
//!
//! TOML profiles, token resolution (keyring + env + plaintext), and
//! translation to `devctl_api::ClientConfig`. The CLI adds
//! `GlobalOpts`-aware wrappers on top.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use devctl_api::ClientConfig;

/// Base URL assumed for `dev` profiles when none is configured.
///
/// Matches the local backend behind the dev-server proxy.
pub const DEV_BASE_URL: &str = "http://127.0.0.1:5173/api/";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{profile}' not found in config")]
    UnknownProfile { profile: String },

    #[error("keyring operation failed: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

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
    10
}

/// A named backend profile.
#[derive(Debug, Deserialize, Serialize)]
pub struct Profile {
    /// Deployment mode: "dev" or "prod".
    #[serde(default = "default_mode")]
    pub mode: String,

    /// Backend base URL (e.g., "https://console.example.com/api").
    ///
    /// Optional for `dev` profiles, which fall back to the local
    /// dev-server proxy. Required for `prod` profiles unless
    /// `DEVCTL_BASE_URL` is set.
    pub base_url: Option<String>,

    /// Bearer token (plaintext, prefer keyring or env var).
    pub token: Option<String>,

    /// Environment variable name containing the bearer token.
    pub token_env: Option<String>,

    /// Override request timeout in seconds.
    pub timeout: Option<u64>,
}

fn default_mode() -> String {
    "dev".into()
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            base_url: None,
            token: None,
            token_env: None,
            timeout: None,
        }
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "devctl", "devctl").map_or_else(
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
    p.push("devctl");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    let path = config_path();

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(&path))
        .merge(Env::prefixed("DEVCTL_CONFIG_").split("_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(&path, toml_str)?;
    Ok(())
}

// ── Token resolution ────────────────────────────────────────────────

/// Keyring service name under which tokens are stored.
const KEYRING_SERVICE: &str = "devctl";

fn keyring_entry(profile_name: &str) -> Result<keyring::Entry, keyring::Error> {
    keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/token"))
}

/// Resolve a bearer token from the credential chain.
///
/// Order: the profile's `token_env` variable, then the system keyring,
/// then plaintext in the config file. A missing token is not an error;
/// requests simply go out unauthenticated.
pub fn resolve_token(
    profile: &Profile,
    profile_name: &str,
) -> Result<Option<SecretString>, ConfigError> {
    // 1. Profile's token_env → env var lookup
    if let Some(ref env_name) = profile.token_env {
        if let Ok(val) = std::env::var(env_name) {
            return Ok(Some(SecretString::from(val)));
        }
    }

    // 2. System keyring
    if let Ok(entry) = keyring_entry(profile_name) {
        if let Ok(secret) = entry.get_password() {
            return Ok(Some(SecretString::from(secret)));
        }
    }

    // 3. Plaintext in config
    if let Some(ref token) = profile.token {
        return Ok(Some(SecretString::from(token.clone())));
    }

    Ok(None)
}

/// Store a token in the system keyring for a profile.
pub fn store_token(profile_name: &str, token: &str) -> Result<(), ConfigError> {
    let entry = keyring_entry(profile_name)?;
    entry.set_password(token)?;
    Ok(())
}

/// Remove a profile's token from the system keyring.
///
/// A missing entry is treated as success.
pub fn delete_token(profile_name: &str) -> Result<(), ConfigError> {
    let entry = keyring_entry(profile_name)?;
    match entry.delete_credential() {
        Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
        Err(err) => Err(err.into()),
    }
}

// ── Profile → ClientConfig ──────────────────────────────────────────

/// Resolve a profile's effective base URL.
///
/// `prod` profiles require an explicit `base_url` (or `DEVCTL_BASE_URL`
/// in the environment); `dev` profiles fall back to [`DEV_BASE_URL`].
pub fn resolve_base_url(profile: &Profile) -> Result<String, ConfigError> {
    if let Some(ref url) = profile.base_url {
        return Ok(url.clone());
    }
    if let Ok(url) = std::env::var("DEVCTL_BASE_URL") {
        return Ok(url);
    }

    match profile.mode.as_str() {
        "dev" => Ok(DEV_BASE_URL.into()),
        "prod" => Err(ConfigError::Validation {
            field: "base_url".into(),
            reason: "required for prod profiles (set base_url or DEVCTL_BASE_URL)".into(),
        }),
        other => Err(ConfigError::Validation {
            field: "mode".into(),
            reason: format!("expected 'dev' or 'prod', got '{other}'"),
        }),
    }
}

/// Build a `ClientConfig` from a profile, without CLI flag overrides.
pub fn profile_to_client_config(profile: &Profile) -> Result<ClientConfig, ConfigError> {
    let base_url = resolve_base_url(profile)?;

    let config = ClientConfig::new(&base_url).map_err(|_| ConfigError::Validation {
        field: "base_url".into(),
        reason: format!("invalid URL: {base_url}"),
    })?;

    let timeout = Duration::from_secs(profile.timeout.unwrap_or(default_timeout()));
    Ok(config.with_timeout(timeout))
}
