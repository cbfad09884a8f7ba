//! Route guard consulted before entering protected views.

use std::sync::Arc;
use tracing::debug;

use crate::manager::SessionManager;

/// Navigation sink the guard redirects through when access is denied.
///
/// The shell (CLI, TUI, embedded web view) supplies the implementation;
/// the guard itself only decides.
pub trait Navigator: Send + Sync {
    /// Take the user to the login view.
    fn redirect_to_login(&self);
}

/// Gate on every protected route.
///
/// The check is synchronous and cheap: it consults the manager's in-memory
/// state, never the durable store, so callers must have restored the
/// session once at startup.
pub struct RouteGuard {
    manager: Arc<SessionManager>,
    navigator: Arc<dyn Navigator>,
}

impl RouteGuard {
    /// Create a guard over the session manager and a navigation sink.
    #[must_use]
    pub fn new(manager: Arc<SessionManager>, navigator: Arc<dyn Navigator>) -> Self {
        Self { manager, navigator }
    }

    /// Returns `true` when the route may be entered.
    ///
    /// A denial redirects to the login view as a side effect, so callers
    /// only have to abort their own navigation.
    #[must_use]
    pub fn can_enter(&self, route: &str) -> bool {
        if self.manager.is_authenticated() {
            return true;
        }
        debug!(route, "unauthenticated, redirecting to login");
        self.navigator.redirect_to_login();
        false
    }
}
