//! Session state container: register, login, logout, profile updates.
//!
//! ARCHITECTURE
//! ============
//! `AuthService` owns the current `SessionRecord`, mirrors it into the
//! durable store, and publishes an `AuthState` snapshot on a `watch`
//! channel. Credential decisions are delegated to a `CredentialVerifier`;
//! outcome messages go to a `Notifier`.
//!
//! CONCURRENCY
//! ===========
//! Every mutating operation holds `writer` for its whole duration,
//! including the simulated latency. Concurrent calls therefore run one at a
//! time in arrival order and their store batches never interleave.
//!
//! ERROR HANDLING
//! ==============
//! Operations return `bool`. Failures are logged, turned into a destructive
//! notification, and reported as `false`. The loading flag is owned by an
//! RAII guard and is cleared on every exit path, including a dropped future.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tracing::{error, info, warn};

use crate::error::AuthError;
use crate::notify::{Notification, Notifier};
use crate::services::credentials::CredentialVerifier;
use crate::services::persistence::{self, RehydratePolicy, SessionRecord};
use crate::state::AuthState;
use crate::store::KeyValueStore;
use crate::types::{User, UserPatch};

/// Simulated round-trip time applied to register, login, and profile updates.
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(1000);

const REGISTER_OK: &str = "Registration successful!";
const REGISTER_FAILED: &str = "Registration failed. Please try again.";
const PASSWORD_MISMATCH: &str = "Passwords do not match";
const LOGIN_OK: &str = "Login successful!";
const LOGIN_FAILED: &str = "Invalid email or password. Try demo@example.com with any password.";
const PROFILE_OK: &str = "Profile updated successfully!";
const PROFILE_FAILED: &str = "Failed to update profile.";

/// Construction-time tuning.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuthOptions {
    pub latency: Duration,
    pub rehydrate: RehydratePolicy,
}

impl Default for AuthOptions {
    fn default() -> Self {
        Self { latency: DEFAULT_LATENCY, rehydrate: RehydratePolicy::default() }
    }
}

/// Sets `loading` on creation and clears it on drop.
struct LoadingGuard<'a> {
    state: &'a watch::Sender<AuthState>,
}

impl<'a> LoadingGuard<'a> {
    fn start(state: &'a watch::Sender<AuthState>) -> Self {
        state.send_modify(|s| s.loading = true);
        Self { state }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.state.send_modify(|s| s.loading = false);
    }
}

pub struct AuthService {
    store: Arc<dyn KeyValueStore>,
    verifier: Arc<dyn CredentialVerifier>,
    notifier: Arc<dyn Notifier>,
    latency: Duration,
    writer: tokio::sync::Mutex<()>,
    session: Mutex<Option<SessionRecord>>,
    state: watch::Sender<AuthState>,
}

impl AuthService {
    /// Build the container and rehydrate any stored session.
    ///
    /// # Errors
    ///
    /// Only with `RehydratePolicy::Strict`, when the stored record cannot be
    /// read. The default policy starts signed out instead.
    pub fn init(
        store: Arc<dyn KeyValueStore>,
        verifier: Arc<dyn CredentialVerifier>,
        notifier: Arc<dyn Notifier>,
        options: AuthOptions,
    ) -> Result<Self, AuthError> {
        let (state, _) = watch::channel(AuthState::initializing());

        let record = persistence::rehydrate(store.as_ref(), options.rehydrate)?;
        match &record {
            Some(r) => info!(user_id = r.user.id, username = %r.user.username, "session restored"),
            None => info!("no stored session"),
        }

        state.send_modify(|s| {
            s.user = record.as_ref().map(|r| r.user.clone());
            s.loading = false;
        });

        Ok(Self {
            store,
            verifier,
            notifier,
            latency: options.latency,
            writer: tokio::sync::Mutex::new(()),
            session: Mutex::new(record),
            state,
        })
    }

    // =========================================================================
    // READ ACCESS
    // =========================================================================

    /// Current snapshot.
    #[must_use]
    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    /// Receiver that wakes on every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.lock_session().as_ref().map(|r| r.user.clone())
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.lock_session().is_some()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        self.lock_session().as_ref().map(|r| r.access_token.clone())
    }

    #[must_use]
    pub fn refresh_token(&self) -> Option<String> {
        self.lock_session().as_ref().and_then(|r| r.refresh_token.clone())
    }

    // =========================================================================
    // OPERATIONS
    // =========================================================================

    /// Create an account and sign in as it.
    ///
    /// A password mismatch is rejected before the store or the verifier is
    /// touched.
    pub async fn register(&self, username: &str, email: &str, password: &str, confirm_password: &str) -> bool {
        if password != confirm_password {
            self.fail("register", &AuthError::PasswordMismatch, PASSWORD_MISMATCH);
            return false;
        }

        let _writer = self.writer.lock().await;
        let _loading = LoadingGuard::start(&self.state);
        tokio::time::sleep(self.latency).await;

        match self.try_register(username, email, password).await {
            Ok(user) => {
                info!(user_id = user.id, username = %user.username, "registration succeeded");
                self.notifier.notify(Notification::success(REGISTER_OK));
                true
            }
            Err(e) => {
                self.fail("register", &e, REGISTER_FAILED);
                false
            }
        }
    }

    /// Sign in. On rejection the previous session, if any, is kept.
    pub async fn login(&self, email: &str, password: &str) -> bool {
        let _writer = self.writer.lock().await;
        let _loading = LoadingGuard::start(&self.state);
        tokio::time::sleep(self.latency).await;

        match self.try_login(email, password).await {
            Ok(user) => {
                info!(user_id = user.id, username = %user.username, "login succeeded");
                self.notifier.notify(Notification::success(LOGIN_OK));
                true
            }
            Err(e) => {
                self.fail("login", &e, LOGIN_FAILED);
                false
            }
        }
    }

    /// Sign out and forget the stored session.
    ///
    /// The in-memory session is cleared even when the store rejects the
    /// removal.
    pub async fn logout(&self) {
        let _writer = self.writer.lock().await;

        if let Err(e) = persistence::clear_record(self.store.as_ref()) {
            error!(error = %e, "failed to clear stored session");
        }
        *self.lock_session() = None;
        self.state.send_modify(|s| s.user = None);

        info!("logged out");
        self.notifier
            .notify(Notification::new("Logged out", "You have been successfully logged out."));
    }

    /// Merge `patch` into the signed-in user and persist it.
    pub async fn update_profile(&self, patch: UserPatch) -> bool {
        let _writer = self.writer.lock().await;

        let current = self.lock_session().clone();
        let Some(current) = current else {
            self.fail("update_profile", &AuthError::NotAuthenticated, PROFILE_FAILED);
            return false;
        };

        let _loading = LoadingGuard::start(&self.state);
        tokio::time::sleep(self.latency).await;

        let record = SessionRecord { user: current.user.merged(patch), ..current };
        match self.commit(record) {
            Ok(user) => {
                info!(user_id = user.id, "profile updated");
                self.notifier.notify(Notification::success(PROFILE_OK));
                true
            }
            Err(e) => {
                self.fail("update_profile", &e, PROFILE_FAILED);
                false
            }
        }
    }

    // =========================================================================
    // INTERNALS
    // =========================================================================

    async fn try_register(&self, username: &str, email: &str, password: &str) -> Result<User, AuthError> {
        let grant = self.verifier.register(username, email, password).await?;
        self.commit(SessionRecord::new(grant.user, grant.tokens))
    }

    async fn try_login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let grant = self.verifier.login(email, password).await?;
        self.commit(SessionRecord::new(grant.user, grant.tokens))
    }

    /// Persist `record`, then adopt it. Nothing is adopted if the write fails.
    fn commit(&self, record: SessionRecord) -> Result<User, AuthError> {
        persistence::save_record(self.store.as_ref(), &record)?;
        let user = record.user.clone();
        *self.lock_session() = Some(record);
        self.state.send_modify(|s| s.user = Some(user.clone()));
        Ok(user)
    }

    fn fail(&self, op: &'static str, err: &AuthError, description: &str) {
        warn!(op, kind = ?err.kind(), error = %err, "session operation failed");
        self.notifier.notify(Notification::error(description));
    }

    fn lock_session(&self) -> MutexGuard<'_, Option<SessionRecord>> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
