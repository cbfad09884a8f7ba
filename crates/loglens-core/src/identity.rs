//! The authenticated principal.
//!
//! An [`Identity`] is created by the session layer on a successful login or
//! OAuth callback and destroyed on logout or a detected invalid-session
//! condition. It is owned exclusively by the session manager; every other
//! component receives read-only clones, either directly or through the
//! identity watch stream.

use serde::{Deserialize, Serialize};
use std::fmt;

/// In-memory representation of the authenticated user.
///
/// Invariant: `token` is non-empty iff this identity represents an
/// authenticated session. The `role` field is case-normalized (lower-cased)
/// once at construction; downstream permission checks must not re-interpret
/// casing beyond the documented admin sentinels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Bearer token for protected endpoints.
    pub token: String,
    /// Login name.
    pub username: String,
    /// Human-readable display name.
    pub display_name: String,
    /// Join date as reported by the backend (opaque string).
    pub join_date: String,
    /// Phone number.
    pub phone: String,
    /// Email address.
    pub email: String,
    /// Case-normalized role claim (e.g. `"admin"`, `"user"`, `"R_MONITOR"`
    /// stays as-is only through [`Identity::normalize_role`] rules).
    pub role: String,
    /// Optional explicit permission grants, in addition to the role.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub permissions: Vec<String>,
}

impl Identity {
    /// Returns `true` if this identity carries a usable session token.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        !self.token.is_empty()
    }

    /// Case-normalize a raw role claim from the backend.
    ///
    /// Login payloads historically arrived with inconsistent casing
    /// (`"ADMIN"`, `"Admin"`, `"admin"`); the identity stores the trimmed,
    /// lower-cased form so every consumer sees one spelling.
    #[must_use]
    pub fn normalize_role(raw: &str) -> String {
        raw.trim().to_lowercase()
    }

    /// Attach explicit permission grants.
    #[must_use]
    pub fn with_permissions(mut self, permissions: Vec<String>) -> Self {
        self.permissions = permissions;
        self
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.username, self.role)
    }
}
