//! Credential (username/password) login strategy.

use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::debug;

use loglens_core::{Envelope, Identity, Transport};

use crate::error::{AuthError, AuthResult};

/// Username/password pair submitted to a login strategy.
#[derive(Debug, Clone)]
pub struct LoginRequest {
    /// Login name.
    pub username: String,
    /// Plain-text password, sent only over the transport.
    pub password: String,
}

/// Pluggable authentication step consumed by the session manager.
///
/// A strategy turns a [`LoginRequest`] into a complete [`Identity`] or an
/// error; it never touches session state itself.
#[async_trait]
pub trait LoginStrategy: Send + Sync {
    /// Authenticate the request and produce the resulting identity.
    async fn authenticate(&self, request: &LoginRequest) -> AuthResult<Identity>;
}

/// Login against the backend's own `POST /login` endpoint.
pub struct CredentialStrategy {
    transport: Arc<dyn Transport>,
    base_url: String,
}

impl CredentialStrategy {
    /// Create a strategy over the given transport and API base URL.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>, base_url: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
        }
    }

    fn login_url(&self) -> String {
        format!("{}/login", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl LoginStrategy for CredentialStrategy {
    async fn authenticate(&self, request: &LoginRequest) -> AuthResult<Identity> {
        let payload = json!({
            "username": request.username,
            "password": request.password,
        });

        let response = self
            .transport
            .post_json(&self.login_url(), &payload, None)
            .await?;
        let envelope = Envelope::from_value(response.json()?);

        if !envelope.is_success() {
            let reason = envelope
                .error_desc
                .clone()
                .unwrap_or_else(|| "invalid username or password".to_string());
            debug!(status = ?envelope.status, "login rejected by backend");
            return Err(AuthError::Rejected(reason));
        }

        let data = envelope
            .body()
            .get("data")
            .filter(|v| v.is_object())
            .ok_or_else(|| {
                AuthError::MalformedResponse("success envelope without a data object".to_string())
            })?;

        let token = require_str(data, "token")?;
        if token.is_empty() {
            return Err(AuthError::MalformedResponse("empty token".to_string()));
        }

        Ok(Identity {
            token,
            username: optional_str(data, "username")
                .unwrap_or_else(|| request.username.clone()),
            display_name: optional_str(data, "name").unwrap_or_default(),
            join_date: optional_str(data, "joinDate").unwrap_or_default(),
            phone: optional_str(data, "phoneNumber").unwrap_or_default(),
            email: optional_str(data, "email").unwrap_or_default(),
            role: Identity::normalize_role(&require_str(data, "role")?),
            permissions: Vec::new(),
        })
    }
}

fn require_str(data: &Value, field: &str) -> AuthResult<String> {
    data.get(field)
        .and_then(Value::as_str)
        .map(ToOwned::to_owned)
        .ok_or_else(|| AuthError::MalformedResponse(format!("missing field `{field}`")))
}

fn optional_str(data: &Value, field: &str) -> Option<String> {
    data.get(field).and_then(Value::as_str).map(ToOwned::to_owned)
}
