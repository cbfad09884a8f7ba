//! `reqwest`-backed [`Transport`] implementation.

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::transport::{RawResponse, Transport, TransportError};

/// Default request timeout.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Production transport over [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport with the default timeout.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError::Network`] if the underlying TLS backend
    /// cannot be initialized.
    pub fn new() -> Result<Self, TransportError> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a transport with a custom request timeout.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError::Network`] if the underlying TLS backend
    /// cannot be initialized.
    pub fn with_timeout(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Network(e.to_string()))?;
        Ok(Self { client })
    }

    fn bearer_header(token: &str) -> Result<reqwest::header::HeaderValue, TransportError> {
        let mut value = reqwest::header::HeaderValue::try_from(format!("Bearer {token}"))
            .map_err(|e| TransportError::Network(format!("invalid token characters: {e}")))?;
        value.set_sensitive(true);
        Ok(value)
    }

    async fn execute(request: reqwest::RequestBuilder) -> Result<RawResponse, TransportError> {
        let response = request
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?
            .to_vec();

        debug!(status, bytes = body.len(), "response received");
        Ok(RawResponse { status, body })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(
        &self,
        url: &str,
        query: &[(String, String)],
        bearer: Option<&str>,
    ) -> Result<RawResponse, TransportError> {
        debug!(%url, params = query.len(), "GET");
        let mut request = self.client.get(url).query(query);
        if let Some(token) = bearer {
            request = request.header(reqwest::header::AUTHORIZATION, Self::bearer_header(token)?);
        }
        Self::execute(request).await
    }

    async fn post_json(
        &self,
        url: &str,
        body: &Value,
        bearer: Option<&str>,
    ) -> Result<RawResponse, TransportError> {
        debug!(%url, "POST json");
        let mut request = self.client.post(url).json(body);
        if let Some(token) = bearer {
            request = request.header(reqwest::header::AUTHORIZATION, Self::bearer_header(token)?);
        }
        Self::execute(request).await
    }

    async fn post_form(
        &self,
        url: &str,
        form: &[(String, String)],
    ) -> Result<RawResponse, TransportError> {
        debug!(%url, "POST form");
        Self::execute(self.client.post(url).form(form)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_builds() {
        assert!(HttpTransport::new().is_ok());
    }

    #[test]
    fn bearer_header_is_sensitive() {
        let header = HttpTransport::bearer_header("abc123").unwrap();
        assert!(header.is_sensitive());
    }

    #[test]
    fn bearer_header_rejects_control_characters() {
        assert!(HttpTransport::bearer_header("bad\ntoken").is_err());
    }
}
