//! The session manager.
//!
//! Single owner of authentication truth. Holds the in-memory identity,
//! mirrors it into the durable vault, and broadcasts every transition on a
//! `tokio::sync::watch` channel so subscribers always observe the latest
//! value without missing the login/logout edges.

use std::sync::{Arc, PoisonError, RwLock};

use tokio::sync::watch;
use tracing::{debug, info, warn};

use loglens_core::Identity;

use crate::credential::{LoginRequest, LoginStrategy};
use crate::error::AuthResult;
use crate::vault::SessionVault;

/// Coarse lifecycle phase of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No identity; protected routes are off limits.
    Anonymous,
    /// A login attempt is in flight.
    Authenticating,
    /// An identity is installed and its token is usable.
    Authenticated,
}

struct Inner {
    identity: Option<Identity>,
    // Non-empty durable token seen in the vault while no profile blob was
    // loadable. Counts as authenticated until the profile arrives or the
    // session is torn down.
    durable_token: Option<String>,
    state: SessionState,
}

/// Owner of the authenticated identity.
///
/// Constructed once at startup over a [`SessionVault`]; every consumer
/// shares it behind an `Arc`. Read accessors are synchronous so that route
/// guards and header construction never await; mutation paths are async
/// because they touch the vault.
pub struct SessionManager {
    inner: RwLock<Inner>,
    vault: SessionVault,
    stream: watch::Sender<Option<Identity>>,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

impl SessionManager {
    /// Create a manager with no identity installed.
    ///
    /// Call [`SessionManager::restore`] afterwards to warm it from the
    /// durable store.
    #[must_use]
    pub fn new(vault: SessionVault) -> Arc<Self> {
        let (stream, _) = watch::channel(None);
        Arc::new(Self {
            inner: RwLock::new(Inner {
                identity: None,
                durable_token: None,
                state: SessionState::Anonymous,
            }),
            vault,
            stream,
        })
    }

    /// Rehydrate the session from the durable store.
    ///
    /// A readable, well-formed persisted identity transitions the manager
    /// to authenticated and emits on the stream. A durable token without a
    /// loadable profile blob still counts as authenticated (the token is
    /// what requests need; the profile fills in later). Anything else
    /// (missing, empty token, corrupted blob) leaves it anonymous. Never
    /// fails.
    pub async fn restore(&self) {
        match self.vault.load().await {
            Some(identity) => {
                info!(user = %identity, "session restored");
                self.install(Some(identity));
            },
            None => {
                if self.observe_durable_token().await {
                    info!("session token restored, profile pending");
                } else {
                    debug!("no persisted session");
                }
            },
        }
    }

    /// The current identity, if authenticated.
    ///
    /// When no in-memory identity exists, attempts a vault load before
    /// answering, so a warm reload sees its session without an explicit
    /// [`SessionManager::restore`]. Never errors; corrupted durable state
    /// is cleared by the vault and reads as `None`.
    pub async fn current_identity(&self) -> Option<Identity> {
        if let Some(identity) = self.read().identity.clone() {
            return Some(identity);
        }
        match self.vault.load().await {
            Some(identity) => {
                self.install(Some(identity.clone()));
                Some(identity)
            },
            None => {
                self.observe_durable_token().await;
                None
            },
        }
    }

    /// The current bearer token, if authenticated.
    ///
    /// Falls back to the durable token when only the warm-reload token has
    /// been observed so far.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        let inner = self.read();
        inner
            .identity
            .as_ref()
            .map(|id| id.token.clone())
            .or_else(|| inner.durable_token.clone())
    }

    /// Returns `true` while an identity with a usable token is installed,
    /// or while a non-empty durable token has been observed before the
    /// profile loaded.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        let inner = self.read();
        inner
            .identity
            .as_ref()
            .is_some_and(Identity::is_authenticated)
            || inner.durable_token.is_some()
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.read().state
    }

    /// Subscribe to identity transitions.
    ///
    /// The receiver immediately holds the latest value, so late subscribers
    /// see the current session without waiting for the next edge.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<Identity>> {
        self.stream.subscribe()
    }

    /// Authenticate through a login strategy and install the result.
    ///
    /// On success the identity is persisted and broadcast before this
    /// returns, so a caller observing `Ok` may immediately rely on
    /// [`SessionManager::is_authenticated`]. On failure any stale durable
    /// state is cleared and the manager returns to anonymous.
    ///
    /// # Errors
    ///
    /// Propagates the strategy's [`AuthError`](crate::AuthError); storage
    /// failures while persisting are reported as `AuthError::Storage` but
    /// the in-memory session is still installed.
    pub async fn login(
        &self,
        strategy: &dyn LoginStrategy,
        request: &LoginRequest,
    ) -> AuthResult<Identity> {
        self.set_state(SessionState::Authenticating);

        match strategy.authenticate(request).await {
            Ok(identity) => {
                self.install_identity(identity.clone()).await?;
                Ok(identity)
            },
            Err(err) => {
                warn!(kind = err.kind(), "login failed");
                self.vault.clear().await;
                self.install(None);
                Err(err)
            },
        }
    }

    /// Install an already-authenticated identity (OAuth callback path).
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` when persisting fails; the in-memory
    /// session is installed either way so the user is not logged out by a
    /// disk problem.
    pub async fn install_identity(&self, identity: Identity) -> AuthResult<Identity> {
        let persisted = self.vault.save(&identity).await;
        info!(user = %identity, "session established");
        self.install(Some(identity.clone()));
        persisted.map(|()| identity)
    }

    /// Tear down the session.
    ///
    /// Idempotent: calling while anonymous clears the durable store again
    /// and emits nothing new on the stream.
    pub async fn logout(&self) {
        self.vault.clear().await;
        if self.read().identity.is_some() {
            info!("session closed");
        }
        self.install(None);
    }

    /// React to a backend-signalled invalid session.
    ///
    /// Same teardown as [`SessionManager::logout`], logged at warning level
    /// because the server, not the user, ended the session.
    pub async fn invalidate(&self) {
        if self.read().identity.is_some() {
            warn!("session invalidated by backend");
        }
        self.vault.clear().await;
        self.install(None);
    }

    /// Record the bare durable token when no profile is loadable.
    ///
    /// Returns `true` when a non-empty token was present.
    async fn observe_durable_token(&self) -> bool {
        let Some(token) = self.vault.token().await else {
            return false;
        };
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if inner.identity.is_none() {
            inner.durable_token = Some(token);
            inner.state = SessionState::Authenticated;
        }
        true
    }

    /// Swap the in-memory identity and emit once per actual transition.
    fn install(&self, identity: Option<Identity>) {
        let state = if identity.as_ref().is_some_and(Identity::is_authenticated) {
            SessionState::Authenticated
        } else {
            SessionState::Anonymous
        };
        {
            let mut inner = self
                .inner
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            inner.identity = identity.clone();
            inner.durable_token = None;
            inner.state = state;
        }
        self.stream.send_if_modified(|current| {
            if *current == identity {
                false
            } else {
                *current = identity;
                true
            }
        });
    }

    fn set_state(&self, state: SessionState) {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .state = state;
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }
}
