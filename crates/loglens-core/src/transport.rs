//! Transport seam between protocol logic and HTTP.
//!
//! Everything above this trait reasons about [`RawResponse`] values; the
//! actual HTTP client is an implementation detail. The production
//! implementation is [`HttpTransport`](crate::http::HttpTransport); tests
//! script a mock.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Transport-level failures: no usable response reached the client.
///
/// These are exactly the failures that trigger the non-paginated fallback
/// in the fetch protocol — application-level error envelopes do not.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request never produced a response (DNS, connect, timeout).
    #[error("network error: {0}")]
    Network(String),

    /// A non-2xx HTTP response arrived with no parseable body.
    #[error("unusable response (HTTP {status}): {message}")]
    BadResponse {
        /// HTTP status code of the unusable response
        status: u16,
        /// Short description of why the body was unusable
        message: String,
    },
}

/// A raw HTTP response: status line plus body bytes.
///
/// Bodies are kept as bytes because the report export endpoint returns a
/// binary payload; JSON endpoints go through [`RawResponse::json`].
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body bytes.
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Returns `true` for 2xx status codes.
    #[must_use]
    pub fn is_http_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parse the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError::BadResponse`] when the body is not
    /// valid JSON. Callers decide whether that is terminal (2xx) or a
    /// fallback trigger (non-2xx).
    pub fn json(&self) -> Result<Value, TransportError> {
        serde_json::from_slice(&self.body).map_err(|err| TransportError::BadResponse {
            status: self.status,
            message: err.to_string(),
        })
    }
}

/// Asynchronous request/response client supplied by the platform.
///
/// `bearer` carries the session token for protected endpoints; `None`
/// means the request goes out unauthenticated (login, register).
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue a GET request with query parameters.
    async fn get(
        &self,
        url: &str,
        query: &[(String, String)],
        bearer: Option<&str>,
    ) -> Result<RawResponse, TransportError>;

    /// Issue a POST request with a JSON body.
    async fn post_json(
        &self,
        url: &str,
        body: &Value,
        bearer: Option<&str>,
    ) -> Result<RawResponse, TransportError>;

    /// Issue a POST request with a URL-encoded form body.
    ///
    /// Used by the OAuth token endpoint, which speaks
    /// `application/x-www-form-urlencoded` rather than JSON.
    async fn post_form(
        &self,
        url: &str,
        form: &[(String, String)],
    ) -> Result<RawResponse, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_success_range() {
        let ok = RawResponse {
            status: 204,
            body: Vec::new(),
        };
        let bad = RawResponse {
            status: 502,
            body: Vec::new(),
        };
        assert!(ok.is_http_success());
        assert!(!bad.is_http_success());
    }

    #[test]
    fn json_parses_valid_body() {
        let resp = RawResponse {
            status: 200,
            body: br#"{"status": 200}"#.to_vec(),
        };
        let value = resp.json().unwrap();
        assert_eq!(value["status"], 200);
    }

    #[test]
    fn json_reports_unusable_body_with_status() {
        let resp = RawResponse {
            status: 502,
            body: b"<html>bad gateway</html>".to_vec(),
        };
        let err = resp.json().unwrap_err();
        assert!(matches!(err, TransportError::BadResponse { status: 502, .. }));
    }
}
