//! Configuration struct definitions.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level loglens configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Config {
    /// Backend API settings.
    pub api: ApiConfig,
    /// OAuth/OIDC provider settings.
    pub oauth: OAuthConfig,
    /// Durable session store settings.
    pub session: SessionConfig,
}

/// Backend API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ApiConfig {
    /// Base URL of the log-analysis backend.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout_secs: 30,
        }
    }
}

/// OAuth/OIDC provider settings (authorization-code flow with PKCE).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct OAuthConfig {
    /// Issuer URL of the provider. Empty disables the OAuth strategy.
    pub issuer: String,
    /// OAuth client identifier registered with the provider.
    pub client_id: String,
    /// Redirect URI the provider sends the authorization code to.
    pub redirect_uri: String,
    /// Requested scopes.
    pub scope: String,
    /// Redirect target used for silent token refresh.
    pub silent_refresh_uri: Option<String>,
    /// Whether provider session checks are enabled.
    pub session_checks: bool,
    /// Group claim value that maps to the admin role.
    pub admin_group: String,
    /// Role claim value that maps to the admin role.
    pub admin_role: String,
}

impl Default for OAuthConfig {
    fn default() -> Self {
        Self {
            issuer: String::new(),
            client_id: String::new(),
            redirect_uri: String::new(),
            scope: "openid profile email".to_string(),
            silent_refresh_uri: None,
            session_checks: true,
            admin_group: "admins".to_string(),
            admin_role: "admin".to_string(),
        }
    }
}

impl OAuthConfig {
    /// Returns `true` when an issuer is configured.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !self.issuer.is_empty()
    }
}

/// Durable session store settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct SessionConfig {
    /// Path of the session store file. `None` uses the platform default
    /// (`~/.loglens/session.json`).
    pub store_path: Option<PathBuf>,
}

impl SessionConfig {
    /// Resolve the session store path, falling back to the platform default.
    #[must_use]
    pub fn resolved_store_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.store_path {
            return Some(path.clone());
        }
        directories::BaseDirs::new().map(|d| d.home_dir().join(".loglens").join("session.json"))
    }
}
