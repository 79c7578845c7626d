// ── Core error types ──
//
// User-facing errors from rentdesk-core. These are NOT API-specific --
// consumers never see HTTP status codes or JSON parse failures directly.
// The `From<rentdesk_api::Error>` impl translates transport-layer errors
// into domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach backend at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Session has ended")]
    SessionEnded,

    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Workflow errors ──────────────────────────────────────────────
    /// A review was attempted on a request that is no longer pending.
    /// Always surfaced to the operator -- this is the double-submission guard.
    #[error("Review conflict: {message}")]
    Conflict { message: String },

    #[error("Request not found: {id}")]
    RequestNotFound { id: String },

    // ── Validation errors ────────────────────────────────────────────
    /// Input rejected before any network call.
    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("Backend error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Returns `true` for failures the poller absorbs silently (logged,
    /// never surfaced). User-initiated actions surface everything.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed { .. } | Self::Timeout { .. } | Self::Api { status: None, .. }
        )
    }

    /// Returns `true` if this error reports a review conflict.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<rentdesk_api::Error> for CoreError {
    fn from(err: rentdesk_api::Error) -> Self {
        match err {
            rentdesk_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            rentdesk_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout { timeout_secs: 0 }
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map(|u| u.to_string())
                            .unwrap_or_else(|| "<unknown>".into()),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            rentdesk_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            rentdesk_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            rentdesk_api::Error::Conflict { message } => CoreError::Conflict { message },
            rentdesk_api::Error::NotFound { message } => CoreError::RequestNotFound { id: message },
            rentdesk_api::Error::Api { status, message } => CoreError::Api {
                message,
                status: Some(status),
            },
            rentdesk_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}
