//! Shared helpers for command handlers.

use std::io::IsTerminal;
use std::path::Path;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use devctl_api::BusySignal;

use crate::error::CliError;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: message.to_owned(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Read and parse a JSON file for `--from-file` flags.
pub fn read_json_file<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| CliError::Validation {
        field: "from-file".into(),
        reason: format!("invalid JSON: {e}"),
    })
}

/// Run `fut` behind a spinner driven by the client's busy signal.
///
/// The spinner only animates while the signal reports in-flight requests,
/// and is suppressed entirely in quiet mode or when stderr is not a
/// terminal.
pub async fn with_spinner<T>(
    busy: &BusySignal,
    message: &str,
    quiet: bool,
    fut: impl Future<Output = T>,
) -> T {
    if quiet || !std::io::stderr().is_terminal() {
        return fut.await;
    }

    let bar = ProgressBar::new_spinner().with_message(message.to_owned());
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        bar.set_style(style);
    }

    let mut in_flight = busy.subscribe();
    let mut fut = std::pin::pin!(fut);
    loop {
        tokio::select! {
            out = &mut fut => {
                bar.finish_and_clear();
                return out;
            }
            changed = in_flight.changed() => {
                if changed.is_err() {
                    // Signal source dropped; nothing left to animate.
                    bar.finish_and_clear();
                    let out = fut.await;
                    return out;
                }
                if *in_flight.borrow() > 0 {
                    bar.enable_steady_tick(Duration::from_millis(80));
                } else {
                    bar.disable_steady_tick();
                }
            }
        }
    }
}
