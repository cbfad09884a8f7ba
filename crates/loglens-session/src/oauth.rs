//! OAuth/OIDC login strategy (authorization code + PKCE).
//!
//! The flow is split across a redirect: [`OAuthClient::begin_authorization`]
//! produces the provider URL plus the PKCE material the caller must hold
//! on to, and [`OAuthClient::complete_authorization`] exchanges the code
//! returned on the redirect, fetches the userinfo claims and installs the
//! resulting identity into the session manager. Consumers observe the
//! result through the manager's watch stream rather than a return channel.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngCore;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use tracing::{debug, info, warn};
use url::Url;
use uuid::Uuid;

use loglens_config::OAuthConfig;
use loglens_core::{Identity, Transport};

use crate::error::{AuthError, AuthResult};
use crate::manager::SessionManager;

/// PKCE verifier/challenge pair (RFC 7636, `S256` method).
#[derive(Debug, Clone)]
pub struct PkcePair {
    /// High-entropy secret sent with the token exchange.
    pub verifier: String,
    /// SHA-256 digest of the verifier, sent with the authorization request.
    pub challenge: String,
}

impl PkcePair {
    /// Generate a fresh verifier and its derived challenge.
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        let verifier = URL_SAFE_NO_PAD.encode(bytes);
        let challenge = URL_SAFE_NO_PAD.encode(Sha256::digest(verifier.as_bytes()));
        Self {
            verifier,
            challenge,
        }
    }
}

/// Everything a caller needs to start the redirect leg of the flow.
#[derive(Debug, Clone)]
pub struct AuthorizationRequest {
    /// Fully-formed provider authorization URL to navigate to.
    pub url: String,
    /// Opaque state nonce to verify on the redirect back.
    pub state: String,
    /// PKCE material to keep until [`OAuthClient::complete_authorization`].
    pub pkce: PkcePair,
}

/// Authorization-code client bound to a configured issuer.
pub struct OAuthClient {
    manager: Arc<SessionManager>,
    transport: Arc<dyn Transport>,
    config: OAuthConfig,
}

impl OAuthClient {
    /// Create a client over the session manager and transport.
    #[must_use]
    pub fn new(
        manager: Arc<SessionManager>,
        transport: Arc<dyn Transport>,
        config: OAuthConfig,
    ) -> Self {
        Self {
            manager,
            transport,
            config,
        }
    }

    fn endpoint(&self, suffix: &str) -> String {
        format!(
            "{}/oauth2/{suffix}",
            self.config.issuer.trim_end_matches('/')
        )
    }

    /// Build the authorization URL for the redirect leg.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::OAuth`] if the configured issuer does not form
    /// a valid URL.
    pub fn begin_authorization(&self) -> AuthResult<AuthorizationRequest> {
        let pkce = PkcePair::generate();
        let state = Uuid::new_v4().to_string();

        let mut url = Url::parse(&self.endpoint("authorize"))
            .map_err(|e| AuthError::OAuth(format!("bad issuer URL: {e}")))?;
        url.query_pairs_mut()
            .append_pair("response_type", "code")
            .append_pair("client_id", &self.config.client_id)
            .append_pair("redirect_uri", &self.config.redirect_uri)
            .append_pair("scope", &self.config.scope)
            .append_pair("state", &state)
            .append_pair("code_challenge", &pkce.challenge)
            .append_pair("code_challenge_method", "S256");

        debug!(issuer = %self.config.issuer, "authorization request prepared");
        Ok(AuthorizationRequest {
            url: url.into(),
            state,
            pkce,
        })
    }

    /// Exchange the authorization code, fetch the claims and install the
    /// identity.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::OAuth`] when the token exchange or userinfo
    /// call fails, and [`AuthError::Transport`] when no response arrives
    /// at all.
    pub async fn complete_authorization(
        &self,
        code: &str,
        pkce: &PkcePair,
    ) -> AuthResult<Identity> {
        let token = self.exchange_code(code, pkce).await?;
        let claims = self.fetch_userinfo(&token).await?;
        let identity = self.identity_from_claims(token, &claims);

        info!(user = %identity, "oauth login completed");
        self.manager.install_identity(identity).await
    }

    /// End the session, notifying the provider best-effort.
    ///
    /// The local session is always torn down; a failing end-session call
    /// at the provider is logged and otherwise ignored.
    pub async fn logout(&self) {
        self.manager.logout().await;
        match self.transport.post_form(&self.endpoint("logout"), &[]).await {
            Ok(_) => debug!("provider session ended"),
            Err(err) => warn!(%err, "provider end-session call failed"),
        }
    }

    async fn exchange_code(&self, code: &str, pkce: &PkcePair) -> AuthResult<String> {
        let form = vec![
            ("grant_type".to_string(), "authorization_code".to_string()),
            ("code".to_string(), code.to_string()),
            ("redirect_uri".to_string(), self.config.redirect_uri.clone()),
            ("client_id".to_string(), self.config.client_id.clone()),
            ("code_verifier".to_string(), pkce.verifier.clone()),
        ];

        let response = self
            .transport
            .post_form(&self.endpoint("token"), &form)
            .await?;
        if !response.is_http_success() {
            return Err(AuthError::OAuth(format!(
                "token exchange failed (HTTP {})",
                response.status
            )));
        }

        let body = response
            .json()
            .map_err(|e| AuthError::OAuth(format!("token response unparseable: {e}")))?;
        body.get("access_token")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .map(ToOwned::to_owned)
            .ok_or_else(|| AuthError::OAuth("token response without access_token".to_string()))
    }

    async fn fetch_userinfo(&self, token: &str) -> AuthResult<Value> {
        let response = self
            .transport
            .get(&self.endpoint("userinfo"), &[], Some(token))
            .await?;
        if !response.is_http_success() {
            return Err(AuthError::OAuth(format!(
                "userinfo failed (HTTP {})",
                response.status
            )));
        }
        response
            .json()
            .map_err(|e| AuthError::OAuth(format!("userinfo unparseable: {e}")))
    }

    /// Map the userinfo claims onto the dashboard's identity shape.
    ///
    /// Role assignment: membership in the configured admin group wins,
    /// then the configured admin role among the `roles` claim; everyone
    /// else is a plain user.
    fn identity_from_claims(&self, token: String, claims: &Value) -> Identity {
        let role = if claim_list_contains(claims, "groups", &self.config.admin_group)
            || claim_list_contains(claims, "roles", &self.config.admin_role)
        {
            "admin".to_string()
        } else {
            "user".to_string()
        };

        Identity {
            token,
            username: str_claim(claims, &["preferred_username", "sub"]).unwrap_or_default(),
            display_name: str_claim(claims, &["name"]).unwrap_or_default(),
            join_date: String::new(),
            phone: str_claim(claims, &["phone_number"]).unwrap_or_default(),
            email: str_claim(claims, &["email"]).unwrap_or_default(),
            role,
            permissions: Vec::new(),
        }
    }
}

fn str_claim(claims: &Value, names: &[&str]) -> Option<String> {
    names
        .iter()
        .find_map(|name| claims.get(*name))
        .and_then(Value::as_str)
        .map(ToOwned::to_owned)
}

fn claim_list_contains(claims: &Value, claim: &str, wanted: &str) -> bool {
    claims
        .get(claim)
        .and_then(Value::as_array)
        .is_some_and(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .any(|item| item.eq_ignore_ascii_case(wanted))
        })
}
