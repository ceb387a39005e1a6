//! Observable auth-session state.
//!
//! SYSTEM CONTEXT
//! ==============
//! `AuthService` publishes an `AuthState` snapshot after every change.
//! Route guards and user-aware views read it to decide between rendering
//! identity-dependent content and redirecting to login.

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use crate::types::User;

/// Authentication state tracking the current user and loading status.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<User>,
    pub loading: bool,
}

impl AuthState {
    /// State published before the stored session has been read.
    #[must_use]
    pub fn initializing() -> Self {
        Self { user: None, loading: true }
    }

    /// A session is active whenever a user is present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Protected views should send the visitor to login once loading has
    /// settled and no user is present.
    #[must_use]
    pub fn should_redirect_unauth(&self) -> bool {
        !self.loading && self.user.is_none()
    }
}
