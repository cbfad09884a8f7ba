//! Session error types.

use loglens_core::TransportError;
use thiserror::Error;

/// Errors reported by the login strategies and the session manager.
///
/// Callers receive a `(kind, message)` pair: [`AuthError::kind`] gives the
/// stable discriminant for programmatic handling, `Display` gives the
/// human-readable message.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The backend rejected the login (non-200 envelope status).
    #[error("login rejected: {0}")]
    Rejected(String),

    /// No usable response reached the client.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The backend answered 200 but the payload was missing or malformed.
    #[error("malformed login response: {0}")]
    MalformedResponse(String),

    /// The durable session store failed.
    #[error("session storage error: {0}")]
    Storage(String),

    /// The OAuth provider flow failed (token exchange, userinfo, or
    /// end-session).
    #[error("oauth error: {0}")]
    OAuth(String),
}

impl AuthError {
    /// Stable error-kind discriminant.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Rejected(_) => "rejected",
            Self::Transport(_) => "transport",
            Self::MalformedResponse(_) => "malformed_response",
            Self::Storage(_) => "storage",
            Self::OAuth(_) => "oauth",
        }
    }
}

/// Result type for session operations.
pub type AuthResult<T> = Result<T, AuthError>;
