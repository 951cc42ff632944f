//! Session commands: store and remove bearer tokens.

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Store a bearer token in the system keyring for the active profile.
pub fn login(global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = devctl_config::load_config_or_default();
    let profile_name = crate::config::active_profile_name(global, &cfg);

    let token = match global.token {
        Some(ref t) => t.clone(),
        None => rpassword::prompt_password("Token: ").map_err(|e| CliError::Validation {
            field: "token".into(),
            reason: format!("prompt failed: {e}"),
        })?,
    };

    if token.is_empty() {
        return Err(CliError::Validation {
            field: "token".into(),
            reason: "token cannot be empty".into(),
        });
    }

    devctl_config::store_token(&profile_name, &token)?;

    if !global.quiet {
        eprintln!("Token stored for profile '{profile_name}'");
    }
    Ok(())
}

/// Remove the stored bearer token for the active profile.
pub fn logout(global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = devctl_config::load_config_or_default();
    let profile_name = crate::config::active_profile_name(global, &cfg);

    devctl_config::delete_token(&profile_name)?;

    if !global.quiet {
        eprintln!("Token removed for profile '{profile_name}'");
    }
    Ok(())
}
