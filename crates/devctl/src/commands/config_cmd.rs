//! Config subcommand handlers.

use std::collections::HashMap;

use dialoguer::{Input, Select};

use devctl_config::{Config, Defaults, Profile};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            let config_path = devctl_config::config_path();
            eprintln!("devctl configuration wizard");
            eprintln!("   Config path: {}\n", config_path.display());

            // 1. Profile name
            let profile_name: String = Input::new()
                .with_prompt("Profile name")
                .default("default".into())
                .interact_text()
                .map_err(prompt_err)?;

            // 2. Deployment mode
            let mode_choices = &["dev (local backend)", "prod"];
            let mode_selection = Select::new()
                .with_prompt("Deployment mode")
                .items(mode_choices)
                .default(0)
                .interact()
                .map_err(prompt_err)?;
            let mode = if mode_selection == 0 { "dev" } else { "prod" };

            // 3. Base URL; prod requires one, dev can use the proxy default
            let base_url = if mode == "prod" {
                let url: String = Input::new()
                    .with_prompt("Backend base URL")
                    .interact_text()
                    .map_err(prompt_err)?;
                if url.is_empty() {
                    return Err(CliError::Validation {
                        field: "base_url".into(),
                        reason: "required for prod profiles".into(),
                    });
                }
                Some(url)
            } else {
                let url: String = Input::new()
                    .with_prompt("Backend base URL")
                    .default(devctl_config::DEV_BASE_URL.into())
                    .interact_text()
                    .map_err(prompt_err)?;
                (url != devctl_config::DEV_BASE_URL).then_some(url)
            };

            // 4. Bearer token, stored in the keyring (never in the file)
            let token = rpassword::prompt_password("Bearer token (empty to skip): ")
                .map_err(prompt_err)?;
            if !token.is_empty() {
                devctl_config::store_token(&profile_name, &token)?;
                eprintln!("   Token stored in system keyring");
            }

            // 5. Build profile and config
            let profile = Profile {
                mode: mode.into(),
                base_url,
                token: None,
                token_env: None,
                timeout: None,
            };

            let mut profiles = HashMap::new();
            profiles.insert(profile_name.clone(), profile);

            let cfg = Config {
                default_profile: Some(profile_name.clone()),
                defaults: Defaults::default(),
                profiles,
            };

            devctl_config::save_config(&cfg)?;

            eprintln!("\nConfiguration written to {}", config_path.display());
            eprintln!("  Active profile: {profile_name}");
            eprintln!("\n  Test it: devctl devices list");

            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = devctl_config::load_config_or_default();
            let out = output::render_config(&global.output, &cfg);
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Path ────────────────────────────────────────────────────
        ConfigCommand::Path => {
            println!("{}", devctl_config::config_path().display());
            Ok(())
        }
    }
}
