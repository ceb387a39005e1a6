//! Error taxonomy for session operations.
//!
//! ERROR HANDLING
//! ==============
//! `AuthError` never escapes a session operation: `AuthService` converts it
//! into a destructive notification and a `false` return. The only public
//! path that surfaces it is strict rehydration in `AuthService::init`.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("passwords do not match")]
    PasswordMismatch,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("not authenticated")]
    NotAuthenticated,
    #[error("stored session record is malformed: {0}")]
    CorruptRecord(String),
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Coarse failure class used for logging and for choosing user-facing text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input rejected before any work was attempted.
    Validation,
    /// Credentials were not accepted.
    Authentication,
    /// The operation requires a signed-in user.
    Precondition,
    /// Storage or data corruption.
    Fault,
}

impl AuthError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::PasswordMismatch => ErrorKind::Validation,
            Self::InvalidCredentials => ErrorKind::Authentication,
            Self::NotAuthenticated => ErrorKind::Precondition,
            Self::CorruptRecord(_) | Self::Store(_) | Self::Json(_) => ErrorKind::Fault,
        }
    }
}
