//! Account registration.

use serde_json::json;
use std::sync::OnceLock;

use loglens_core::{ClientError, ClientResult};
use regex::Regex;

use crate::client::ApiClient;

/// A new-account request, validated client-side before dispatch.
#[derive(Debug, Clone)]
pub struct RegisterRequest {
    /// Desired login name.
    pub username: String,
    /// Password.
    pub password: String,
    /// Contact email address.
    pub email: String,
}

impl RegisterRequest {
    /// Validate the request without touching the network.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError::Validation`] naming the first offending
    /// field: empty username, empty password, or a malformed email.
    pub fn validate(&self) -> ClientResult<()> {
        if self.username.trim().is_empty() {
            return Err(validation("username", "must not be empty"));
        }
        if self.password.is_empty() {
            return Err(validation("password", "must not be empty"));
        }
        if !email_pattern().is_match(&self.email) {
            return Err(validation("email", "not a valid email address"));
        }
        Ok(())
    }
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("literal pattern compiles")
    })
}

fn validation(field: &str, message: &str) -> ClientError {
    ClientError::Validation {
        field: field.to_string(),
        message: message.to_string(),
    }
}

impl ApiClient {
    /// Register a new account.
    ///
    /// # Errors
    ///
    /// Returns a validation error before dispatch for a malformed request,
    /// and propagates transport and envelope errors otherwise.
    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<()> {
        request.validate()?;
        self.command(
            "/register",
            &json!({
                "username": request.username,
                "password": request.password,
                "email": request.email,
            }),
        )
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::client::tests::{Reply, ScriptedTransport, client, session};

    fn request() -> RegisterRequest {
        RegisterRequest {
            username: "carol".to_string(),
            password: "secret".to_string(),
            email: "carol@example.com".to_string(),
        }
    }

    #[test]
    fn valid_request_passes() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn empty_fields_are_named() {
        let mut req = request();
        req.username = "  ".to_string();
        assert!(matches!(
            req.validate().unwrap_err(),
            ClientError::Validation { field, .. } if field == "username"
        ));

        let mut req = request();
        req.password = String::new();
        assert!(matches!(
            req.validate().unwrap_err(),
            ClientError::Validation { field, .. } if field == "password"
        ));
    }

    #[test]
    fn malformed_emails_are_rejected() {
        for email in ["", "carol", "carol@", "@example.com", "a b@example.com", "a@b"] {
            let mut req = request();
            req.email = email.to_string();
            assert!(
                matches!(
                    req.validate().unwrap_err(),
                    ClientError::Validation { field, .. } if field == "email"
                ),
                "{email:?} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn invalid_request_never_reaches_the_network() {
        let transport = ScriptedTransport::new(vec![]);
        let api = client(transport.clone(), session());

        let mut req = request();
        req.email = "nope".to_string();
        assert!(api.register(&req).await.is_err());
        assert!(transport.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn successful_registration_posts_once() {
        let transport = ScriptedTransport::new(vec![Reply::Body(json!({"status": 200}))]);
        let api = client(transport.clone(), session());

        api.register(&request()).await.unwrap();
        let requests = transport.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].0, "http://api.test/register");
    }
}
