//! Authentication session state.
//!
//! `SessionManager` is the only place that decides whether the client is
//! authenticated. It never trusts local bookkeeping: after a login it asks
//! the server (`GET /auth/me`) who we are and keeps that record.
//!
//! The API client is passed into each operation rather than stored, so
//! whoever owns the session also decides which server it talks to.
//!
//! `ExpiryWatch` notices 401s seen by the client between commands, so a
//! session the server dropped can be re-checked with `revalidate`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::api::{ApiClient, ApiRequest, Transport, UnauthorizedHook, User};
use crate::errors::{PasswordyError, Result};

/// Where the session currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    /// A session check is in flight (initial state).
    Loading,
    /// The server confirmed this user.
    Authenticated(User),
    /// No session.
    Unauthenticated,
}

/// Holds the current user and drives login/logout/check.
#[derive(Debug)]
pub struct SessionManager {
    state: AuthState,
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionManager {
    /// A fresh manager starts in `Loading` until the first `check`.
    pub fn new() -> Self {
        Self {
            state: AuthState::Loading,
        }
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    /// The confirmed user, if any.
    pub fn user(&self) -> Option<&User> {
        match &self.state {
            AuthState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    /// True only when a server-confirmed user record is held.
    pub fn is_authenticated(&self) -> bool {
        self.user().is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.state == AuthState::Loading
    }

    /// Ask the server who we are.
    ///
    /// Any failure (401, network, bad body) leaves the session
    /// unauthenticated; the error is only logged.
    pub fn check<T: Transport>(&mut self, api: &ApiClient<T>) -> &AuthState {
        self.state = AuthState::Loading;
        self.state = match api.me() {
            Ok(user) => {
                tracing::debug!(username = %user.username, "session confirmed");
                AuthState::Authenticated(user)
            }
            Err(e) => {
                tracing::debug!(error = %e, "no active session");
                AuthState::Unauthenticated
            }
        };
        &self.state
    }

    /// Submit credentials, then re-check the session with the server.
    ///
    /// A rejected login propagates its error and leaves the session
    /// unauthenticated. A login the server accepted but whose follow-up
    /// check fails is reported as `NotAuthenticated`.
    pub fn login<T: Transport>(
        &mut self,
        api: &ApiClient<T>,
        username: &str,
        password: &str,
    ) -> Result<&User> {
        if let Err(e) = api.login(username, password) {
            self.state = AuthState::Unauthenticated;
            return Err(e);
        }

        self.check(api);
        self.user().ok_or(PasswordyError::NotAuthenticated)
    }

    /// Ask the server to end the session, then forget it locally.
    ///
    /// The local session is cleared whatever the server answered. A server
    /// error is still returned so the caller can report it.
    pub fn logout<T: Transport>(&mut self, api: &ApiClient<T>) -> Result<()> {
        let result = api.logout();
        self.state = AuthState::Unauthenticated;
        if let Err(ref e) = result {
            tracing::warn!(error = %e, "logout request failed; local session cleared anyway");
        }
        result
    }

    /// Re-check the session if the server rejected a request since the
    /// last call.
    ///
    /// Returns `true` when an authenticated session turned out to have
    /// lapsed. The watch is cleared either way.
    pub fn revalidate<T: Transport>(&mut self, api: &ApiClient<T>, watch: &ExpiryWatch) -> bool {
        if !watch.take() || !self.is_authenticated() {
            return false;
        }
        self.check(api);
        watch.clear();
        if self.is_authenticated() {
            return false;
        }
        tracing::info!("session expired on the server");
        true
    }
}

/// Flag raised by the client's unauthorized hook.
#[derive(Debug, Clone, Default)]
pub struct ExpiryWatch {
    rejected: Arc<AtomicBool>,
}

impl ExpiryWatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// A hook for `ApiClient::with_unauthorized_hook` that raises this flag.
    pub fn hook(&self) -> UnauthorizedHook {
        let rejected = Arc::clone(&self.rejected);
        Box::new(move |_: &ApiRequest| rejected.store(true, Ordering::SeqCst))
    }

    /// Lower the flag and report whether it was raised.
    pub fn take(&self) -> bool {
        self.rejected.swap(false, Ordering::SeqCst)
    }

    pub fn clear(&self) {
        self.rejected.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_loading_and_unauthenticated() {
        let session = SessionManager::new();
        assert!(session.is_loading());
        assert!(!session.is_authenticated());
        assert!(session.user().is_none());
    }

    #[test]
    fn watch_is_raised_by_its_hook_once() {
        let watch = ExpiryWatch::new();
        let hook = watch.hook();
        assert!(!watch.take());

        hook(&ApiRequest::new(crate::api::Method::Get, "/api/v1/vault/"));
        assert!(watch.take());
        assert!(!watch.take());
    }
}
