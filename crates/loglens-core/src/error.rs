//! Error types for loglens client operations.

use thiserror::Error;

use crate::transport::TransportError;

/// Errors that can occur in loglens client operations.
///
/// The taxonomy mirrors how failures are surfaced to a user of the
/// dashboard: transport failures may be retried through the non-paginated
/// fallback, a canonical 401 forces the session back to anonymous, and
/// validation failures never reach the network at all. A canonical 404 is
/// deliberately *not* represented here — it is an empty result with a
/// notice, not a failure.
#[derive(Debug, Error)]
pub enum ClientError {
    /// No usable response reached the client (network error, timeout, or a
    /// non-2xx response with no parseable body).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The backend reported canonical error code 401: the session token is
    /// no longer valid. Never shown raw; translated to a forced logout.
    #[error("session expired")]
    SessionExpired,

    /// Client-side validation rejected the request before dispatch.
    #[error("validation failed: {field}: {message}")]
    Validation {
        /// The field that failed validation
        field: String,
        /// Human-readable description of the problem
        message: String,
    },

    /// The backend returned a non-200 canonical status other than 401/404.
    #[error("request failed: {message}")]
    Api {
        /// Canonical error code, when the backend supplied one
        code: Option<String>,
        /// Human-readable description (backend `errorDesc` or a generic
        /// fallback)
        message: String,
    },

    /// Durable session storage failed.
    #[error("storage error: {0}")]
    Storage(String),
}

impl ClientError {
    /// Build an [`ClientError::Api`] from an optional backend description.
    ///
    /// Falls back to a generic message when the backend supplied none, so
    /// callers never surface an empty error string.
    #[must_use]
    pub fn api(code: Option<String>, desc: Option<String>) -> Self {
        Self::Api {
            code,
            message: desc.unwrap_or_else(|| "an unexpected error occurred, please retry".into()),
        }
    }

    /// Returns `true` if this error should force the session to anonymous.
    #[must_use]
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::SessionExpired)
    }
}

/// Result type for loglens client operations.
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_uses_backend_description() {
        let err = ClientError::api(Some("500".into()), Some("database offline".into()));
        assert_eq!(err.to_string(), "request failed: database offline");
    }

    #[test]
    fn api_error_falls_back_to_generic_message() {
        let err = ClientError::api(Some("500".into()), None);
        assert!(err.to_string().contains("please retry"));
    }

    #[test]
    fn session_expired_is_flagged() {
        assert!(ClientError::SessionExpired.is_session_expired());
        assert!(!ClientError::api(None, None).is_session_expired());
    }
}
