// ── Core error types ──
//
// User-facing errors from garagem-core. These are NOT API-specific --
// consumers never see HTTP status codes or JSON parse failures directly.
// The `From<garagem_api::Error>` impl translates transport-layer errors
// into domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach the backend at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Request timed out")]
    Timeout,

    // ── Operation errors ─────────────────────────────────────────────
    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    // ── File IO (image encoding) ─────────────────────────────────────
    #[error("Could not read file {path}: {reason}")]
    FileRead { path: String, reason: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<garagem_api::Error> for CoreError {
    fn from(err: garagem_api::Error) -> Self {
        match err {
            garagem_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            garagem_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
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
            garagem_api::Error::InvalidUrl(e) => CoreError::Internal(format!("Invalid URL: {e}")),
            garagem_api::Error::Api {
                message, status, ..
            } => CoreError::Api {
                message,
                status: Some(status),
            },
            garagem_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}
