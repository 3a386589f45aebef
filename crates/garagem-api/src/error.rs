use thiserror::Error;

/// Top-level error type for the `garagem-api` crate.
///
/// Covers every failure mode across both API surfaces: the REST table API
/// and the auth API. `garagem-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Sign-in failed or the session token was rejected. The message is the
    /// provider's human-readable text, suitable for inline display.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── REST table API ──────────────────────────────────────────────
    /// Structured error from the table API (parsed from the provider's
    /// `{"message": ..., "code": ...}` error body).
    #[error("API error (HTTP {status}): {message}")]
    Api {
        message: String,
        code: Option<String>,
        status: u16,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this error indicates the session token has
    /// expired or was rejected, and re-authentication might resolve it.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }
}

/// Char-safe preview of a response body for error messages. Byte slicing
/// would panic when the cutoff lands inside a multi-byte character.
pub(crate) fn body_preview(body: &str) -> String {
    body.chars().take(200).collect()
}
