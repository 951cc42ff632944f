//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors
//! with actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use devctl_config::ConfigError;
use devctl_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const PERMISSION: i32 = 5;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Authentication ───────────────────────────────────────────────

    #[error("Session expired")]
    #[diagnostic(
        code(devctl::auth_expired),
        help("Log in again with: devctl login")
    )]
    AuthExpired,

    #[error("Permission denied")]
    #[diagnostic(
        code(devctl::permission_denied),
        help("Your token does not grant access to this operation.")
    )]
    PermissionDenied,

    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not reach the console backend: {reason}")]
    #[diagnostic(
        code(devctl::connection_failed),
        help(
            "Check that the backend is running and the base URL is correct.\n\
             Override it with --base-url or DEVCTL_BASE_URL."
        )
    )]
    ConnectionFailed { reason: String },

    #[error("Request timed out")]
    #[diagnostic(
        code(devctl::timeout),
        help("Increase timeout with --timeout or check backend responsiveness.")
    )]
    Timeout,

    // ── API ──────────────────────────────────────────────────────────

    #[error("Backend rejected the request: {message}")]
    #[diagnostic(code(devctl::api_error))]
    ApiError { code: Option<i32>, message: String },

    #[error("{message}")]
    #[diagnostic(code(devctl::request_failed))]
    RequestFailed { message: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(devctl::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(devctl::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: devctl config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error(transparent)]
    #[diagnostic(code(devctl::config))]
    Config(#[from] ConfigError),

    // ── Interactive ──────────────────────────────────────────────────

    #[error("Confirmation required: {action}")]
    #[diagnostic(
        code(devctl::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO / Serialization ───────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(devctl::json), help("Check the JSON file contents and try again."))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::AuthExpired => exit_code::AUTH,
            Self::PermissionDenied => exit_code::PERMISSION,
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::Validation { .. } | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::AuthExpired => CliError::AuthExpired,

            CoreError::PermissionDenied => CliError::PermissionDenied,

            CoreError::Timeout => CliError::Timeout,

            CoreError::ConnectionFailed { reason } => CliError::ConnectionFailed { reason },

            CoreError::Api { message, code, .. } => CliError::ApiError { code, message },

            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },

            CoreError::Internal(message) => CliError::RequestFailed { message },
        }
    }
}
