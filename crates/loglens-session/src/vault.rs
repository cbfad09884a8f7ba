//! Durable projection of the identity.
//!
//! Two keys, always written and cleared together: the serialized identity
//! blob and a duplicated bare token. The duplicated token is what makes a
//! warm reload answer "authenticated" before the full profile has been
//! deserialized — and its absence is authoritative: no durable token means
//! no session, even if a stale blob survives.

use std::sync::Arc;
use tracing::{debug, warn};

use loglens_core::Identity;
use loglens_storage::KvStore;

use crate::error::{AuthError, AuthResult};

/// Store key of the serialized identity blob.
pub(crate) const IDENTITY_KEY: &str = "loglens.identity";

/// Store key of the duplicated bare token.
pub(crate) const TOKEN_KEY: &str = "loglens.token";

/// Typed facade over the key-value store enforcing the two-key invariant.
#[derive(Clone)]
pub struct SessionVault {
    store: Arc<dyn KvStore>,
}

impl std::fmt::Debug for SessionVault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionVault").finish_non_exhaustive()
    }
}

impl SessionVault {
    /// Create a vault over any key-value store.
    #[must_use]
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    /// Persist an identity: blob first, then the duplicated token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Storage`] if either write fails; a partial
    /// write is cleaned up so the two keys never diverge.
    pub async fn save(&self, identity: &Identity) -> AuthResult<()> {
        let blob = serde_json::to_string(identity)
            .map_err(|e| AuthError::Storage(format!("serialize identity: {e}")))?;

        self.store
            .set(IDENTITY_KEY, &blob)
            .await
            .map_err(|e| AuthError::Storage(e.to_string()))?;

        if let Err(e) = self.store.set(TOKEN_KEY, &identity.token).await {
            // Token write failed: remove the blob so no half-session remains.
            let _ = self.store.delete(IDENTITY_KEY).await;
            return Err(AuthError::Storage(e.to_string()));
        }

        debug!(user = %identity.username, "session persisted");
        Ok(())
    }

    /// Load the persisted identity.
    ///
    /// Returns `None` — and clears the durable state — when the token key
    /// is absent/empty or the blob fails to deserialize. Never errors:
    /// corrupted durable state degrades to "unauthenticated".
    pub async fn load(&self) -> Option<Identity> {
        let token = self.token().await?;

        let blob = match self.store.get(IDENTITY_KEY).await {
            Ok(Some(blob)) => blob,
            Ok(None) => return None,
            Err(err) => {
                warn!(%err, "session store unreadable");
                return None;
            },
        };

        match serde_json::from_str::<Identity>(&blob) {
            Ok(mut identity) => {
                // The duplicated token is authoritative; resync the blob's
                // copy if an interrupted write left them apart.
                if identity.token != token {
                    identity.token = token;
                }
                Some(identity)
            },
            Err(err) => {
                warn!(%err, "persisted identity corrupted, clearing");
                self.clear().await;
                None
            },
        }
    }

    /// The duplicated bare token, if a non-empty one is stored.
    pub async fn token(&self) -> Option<String> {
        match self.store.get(TOKEN_KEY).await {
            Ok(Some(token)) if !token.is_empty() => Some(token),
            Ok(_) => None,
            Err(err) => {
                warn!(%err, "session store unreadable");
                None
            },
        }
    }

    /// Remove both keys. Failures are logged, not propagated: clearing is
    /// always best-effort and callers treat the session as gone regardless.
    pub async fn clear(&self) {
        if let Err(err) = self.store.delete(IDENTITY_KEY).await {
            warn!(%err, "failed to clear identity blob");
        }
        if let Err(err) = self.store.delete(TOKEN_KEY).await {
            warn!(%err, "failed to clear token");
        }
    }
}
