#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Session lifecycle for the loglens client.
//!
//! One [`SessionManager`] instance owns the authenticated identity. Every
//! other component receives a shared reference and consumes the manager's
//! contract — nothing else in the system may hold its own copy of
//! authentication truth.
//!
//! Two mutually exclusive login strategies feed the manager:
//!
//! - [`CredentialStrategy`] — username/password against `POST /login`,
//!   returning the identity directly
//! - [`OAuthClient`] — authorization-code flow with PKCE against a
//!   configured issuer; the identity is published through the watch
//!   stream rather than returned, so callers subscribe instead of await
//!
//! The manager's change stream is a `tokio::sync::watch` channel: hot,
//! ordered, and replaying the latest value to new subscribers.

/// Credential (username/password) login strategy.
pub mod credential;
/// Session error types.
pub mod error;
/// Route guard consulted before entering protected views.
pub mod guard;
/// The session manager.
pub mod manager;
/// OAuth/OIDC login strategy (authorization code + PKCE).
pub mod oauth;
/// Durable projection of the identity.
pub mod vault;

pub use credential::{CredentialStrategy, LoginRequest, LoginStrategy};
pub use error::{AuthError, AuthResult};
pub use guard::{Navigator, RouteGuard};
pub use manager::{SessionManager, SessionState};
pub use oauth::{AuthorizationRequest, OAuthClient, PkcePair};
pub use vault::SessionVault;
