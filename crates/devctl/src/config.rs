//! CLI-side configuration glue: profile selection and client construction.
//!
//! The shared types and token chain live in `devctl-config`; this module
//! layers `GlobalOpts` overrides on top and produces a ready `ApiClient`.

use std::sync::Arc;
use std::time::Duration;

use secrecy::SecretString;

use devctl_api::{ApiClient, ClientConfig};
use devctl_config::{Config, Profile};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Build an `ApiClient` from the config file, profile, and CLI overrides.
///
/// Returns the client together with the resolved profile name so command
/// handlers can reference it in messages.
pub fn resolve_client(global: &GlobalOpts) -> Result<(Arc<ApiClient>, String), CliError> {
    let cfg = devctl_config::load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);

    // A profile explicitly named on the command line must exist; the
    // implicit default falls back to an empty dev profile.
    let fallback = Profile::default();
    let profile = match cfg.profiles.get(&profile_name) {
        Some(p) => p,
        None if global.profile.is_none() => &fallback,
        None => {
            let available: Vec<_> = cfg.profiles.keys().cloned().collect();
            return Err(CliError::ProfileNotFound {
                name: profile_name,
                available: if available.is_empty() {
                    "(none)".into()
                } else {
                    available.join(", ")
                },
            });
        }
    };

    // 1. Base URL (flag/env > profile > mode default)
    let client_config = if let Some(ref url) = global.base_url {
        ClientConfig::new(url).map_err(|_| CliError::Validation {
            field: "base-url".into(),
            reason: format!("invalid URL: {url}"),
        })?
    } else {
        devctl_config::profile_to_client_config(profile)?
    };

    // 2. Timeout (flag/env > profile > default)
    let client_config = match global.timeout {
        Some(secs) => client_config.with_timeout(Duration::from_secs(secs)),
        None => client_config,
    };

    let client = ApiClient::new(&client_config).map_err(|e| CliError::Validation {
        field: "base-url".into(),
        reason: e.to_string(),
    })?;

    // 3. Bearer token (flag/env > token_env > keyring > plaintext)
    let token = match global.token {
        Some(ref t) => Some(SecretString::from(t.clone())),
        None => devctl_config::resolve_token(profile, &profile_name)?,
    };
    if let Some(token) = token {
        client.set_token(token);
    }

    Ok((Arc::new(client), profile_name))
}
