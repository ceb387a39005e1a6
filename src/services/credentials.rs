//! Credential verification.
//!
//! DESIGN
//! ======
//! `AuthService` never decides on its own whether credentials are good. It
//! asks a `CredentialVerifier` for an `AuthGrant`, so a verifier backed by a
//! real API can replace `AllowListVerifier` without touching session control
//! flow.
//!
//! `AllowListVerifier` is the demo rule set: a fixed list of accepted emails,
//! no password check, and a synthetic user with id `1`.

use crate::error::AuthError;
use crate::services::session::TokenPair;
use crate::types::User;

/// Identifier assigned to every synthesized user.
pub const MOCK_USER_ID: i64 = 1;

/// Emails accepted by `AllowListVerifier::default()`.
pub const DEFAULT_ALLOWED_EMAILS: [&str; 2] = ["demo@example.com", "user@example.com"];

const LOGIN_FIRST_NAME: &str = "Demo";
const LOGIN_LAST_NAME: &str = "User";

/// A successful sign-in: the user record plus the tokens that go with it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthGrant {
    pub user: User,
    pub tokens: TokenPair,
}

/// Decides whether login and registration requests are accepted.
#[async_trait::async_trait]
pub trait CredentialVerifier: Send + Sync {
    /// Verify an email/password pair.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` when the pair is rejected.
    async fn login(&self, email: &str, password: &str) -> Result<AuthGrant, AuthError>;

    /// Create an account.
    ///
    /// # Errors
    ///
    /// Returns an error when the account cannot be created.
    async fn register(&self, username: &str, email: &str, password: &str) -> Result<AuthGrant, AuthError>;
}

/// Username derived from the part of `email` before the first `@`.
#[must_use]
pub fn username_from_email(email: &str) -> String {
    email.split('@').next().unwrap_or_default().to_owned()
}

/// Accepts any password for a fixed set of emails.
#[derive(Clone, Debug)]
pub struct AllowListVerifier {
    allowed: Vec<String>,
}

impl AllowListVerifier {
    #[must_use]
    pub fn new<I, S>(allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { allowed: allowed.into_iter().map(Into::into).collect() }
    }

    #[must_use]
    pub fn allowed(&self) -> &[String] {
        &self.allowed
    }

    /// Exact, case-sensitive match against the allow-list.
    #[must_use]
    pub fn accepts(&self, email: &str) -> bool {
        self.allowed.iter().any(|allowed| allowed == email)
    }
}

impl Default for AllowListVerifier {
    fn default() -> Self {
        Self::new(DEFAULT_ALLOWED_EMAILS)
    }
}

#[async_trait::async_trait]
impl CredentialVerifier for AllowListVerifier {
    async fn login(&self, email: &str, _password: &str) -> Result<AuthGrant, AuthError> {
        if !self.accepts(email) {
            return Err(AuthError::InvalidCredentials);
        }

        let user = User {
            id: MOCK_USER_ID,
            username: username_from_email(email),
            email: email.to_owned(),
            first_name: Some(LOGIN_FIRST_NAME.to_owned()),
            last_name: Some(LOGIN_LAST_NAME.to_owned()),
        };
        Ok(AuthGrant { user, tokens: TokenPair::issue() })
    }

    async fn register(&self, username: &str, email: &str, _password: &str) -> Result<AuthGrant, AuthError> {
        let user = User {
            id: MOCK_USER_ID,
            username: username.to_owned(),
            email: email.to_owned(),
            first_name: Some(String::new()),
            last_name: Some(String::new()),
        };
        Ok(AuthGrant { user, tokens: TokenPair::issue() })
    }
}

#[cfg(test)]
#[path = "credentials_test.rs"]
mod tests;
