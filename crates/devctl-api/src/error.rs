use thiserror::Error;

/// Top-level error type for the `devctl-api` crate.
///
/// Covers every failure mode of a request: application-level failures
/// (envelope `Code != 200`), HTTP status failures, and transport
/// failures where no response arrived at all. `devctl-core` maps these
/// into user-facing diagnostics; [`user_message`](Error::user_message)
/// provides the canned notification text for each class.
#[derive(Debug, Error)]
pub enum Error {
    // ── Application ─────────────────────────────────────────────────
    /// The backend envelope reported a non-success `Code`.
    #[error("API error (code {code}): {message}")]
    Api { code: i32, message: String },

    // ── HTTP status ─────────────────────────────────────────────────
    /// The server responded with a non-2xx HTTP status.
    #[error("HTTP {status}: {detail}")]
    Status { status: u16, detail: String },

    // ── Transport ───────────────────────────────────────────────────
    /// No usable response: connection refused, DNS failure, timeout.
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this error indicates the session has expired
    /// and logging in again might resolve it.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::Status { status: 401, .. })
    }

    /// Returns `true` if no response was received at all.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// The transient notification text shown to the operator.
    ///
    /// HTTP statuses map to canned messages; envelope failures surface
    /// the server's `Message` (or a generic fallback when it is empty);
    /// transport failures collapse into a single network-error string.
    pub fn user_message(&self) -> String {
        match self {
            Self::Api { message, .. } => {
                if message.is_empty() {
                    "Request failed".into()
                } else {
                    message.clone()
                }
            }
            Self::Status { status: 401, .. } => {
                "Session expired, please log in again".into()
            }
            Self::Status { status: 403, .. } => "Permission denied".into(),
            Self::Status { status: 500, .. } => "Internal server error".into(),
            Self::Status { detail, .. } => {
                if detail.is_empty() {
                    "Request failed".into()
                } else {
                    format!("Request failed: {detail}")
                }
            }
            Self::Transport(_) => "Network error, check your connection".into(),
            Self::InvalidUrl(_) | Self::Deserialization { .. } => {
                "Request failed: malformed response".into()
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn status_401_maps_to_session_expired() {
        let err = Error::Status { status: 401, detail: String::new() };
        assert_eq!(err.user_message(), "Session expired, please log in again");
        assert!(err.is_auth_expired());
    }

    #[test]
    fn status_403_maps_to_permission_denied() {
        let err = Error::Status { status: 403, detail: String::new() };
        assert_eq!(err.user_message(), "Permission denied");
    }

    #[test]
    fn status_500_maps_to_server_error() {
        let err = Error::Status { status: 500, detail: "boom".into() };
        assert_eq!(err.user_message(), "Internal server error");
    }

    #[test]
    fn other_status_carries_server_detail() {
        let err = Error::Status { status: 404, detail: "no such route".into() };
        assert_eq!(err.user_message(), "Request failed: no such route");
    }

    #[test]
    fn envelope_message_is_surfaced() {
        let err = Error::Api { code: 1005, message: "device not found".into() };
        assert_eq!(err.user_message(), "device not found");
    }

    #[test]
    fn empty_envelope_message_falls_back() {
        let err = Error::Api { code: 1001, message: String::new() };
        assert_eq!(err.user_message(), "Request failed");
    }
}
