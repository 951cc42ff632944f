// ── Core error types ──
//
// User-facing errors from devctl-core. Consumers never see reqwest
// errors or raw envelope codes directly; the `From<devctl_api::Error>`
// impl translates request-layer failures into domain variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Session expired, please log in again")]
    AuthExpired,

    #[error("Permission denied")]
    PermissionDenied,

    #[error("Request timed out")]
    Timeout,

    #[error("Cannot reach the backend: {reason}")]
    ConnectionFailed { reason: String },

    #[error("API error: {message}")]
    Api {
        message: String,
        /// Envelope error code, when the failure was application-level.
        code: Option<i32>,
        /// HTTP status, when the failure was transport-level.
        status: Option<u16>,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<devctl_api::Error> for CoreError {
    fn from(err: devctl_api::Error) -> Self {
        let message = err.user_message();
        match err {
            devctl_api::Error::Status { status: 401, .. } => CoreError::AuthExpired,
            devctl_api::Error::Status { status: 403, .. } => CoreError::PermissionDenied,
            devctl_api::Error::Status { status, .. } => CoreError::Api {
                message,
                code: None,
                status: Some(status),
            },
            devctl_api::Error::Api { code, .. } => CoreError::Api {
                message,
                code: Some(code),
                status: None,
            },
            devctl_api::Error::Transport(e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else {
                    CoreError::ConnectionFailed {
                        reason: e.to_string(),
                    }
                }
            }
            devctl_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            devctl_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}
