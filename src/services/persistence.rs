//! Persisted session record: load, save, clear, rehydrate.
//!
//! DESIGN
//! ======
//! The record is three store keys (`user`, `accessToken`, `refreshToken`)
//! that are written in one `set_many` batch and removed in one
//! `remove_many` batch, so the store never holds a user without tokens.
//!
//! ERROR HANDLING
//! ==============
//! Rehydration is the only place malformed data can appear. Under
//! `RehydratePolicy::FailClosed` any unreadable record is cleared and the
//! session starts signed out. If the store itself cannot be parsed, it is
//! reset so later writes succeed. `RehydratePolicy::Strict` surfaces the error
//! to the caller instead.

use tracing::{debug, warn};

use crate::error::AuthError;
use crate::services::session::TokenPair;
use crate::store::{ACCESS_TOKEN_KEY, KeyValueStore, REFRESH_TOKEN_KEY, SESSION_KEYS, StoreError, USER_KEY};
use crate::types::User;

/// What to do when the stored record cannot be read at startup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RehydratePolicy {
    /// Clear the record and start signed out.
    #[default]
    FailClosed,
    /// Return the error from construction.
    Strict,
}

/// The user and tokens that make up a signed-in session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionRecord {
    pub user: User,
    pub access_token: String,
    /// Absent only when a rehydrated store lacked the key.
    pub refresh_token: Option<String>,
}

impl SessionRecord {
    #[must_use]
    pub fn new(user: User, tokens: TokenPair) -> Self {
        Self { user, access_token: tokens.access_token, refresh_token: Some(tokens.refresh_token) }
    }
}

/// Raw result of reading the three session keys.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoredSession {
    /// No session keys at all.
    Empty,
    /// Some keys present but not a user with an access token.
    Partial,
    Complete(SessionRecord),
}

/// Read the session keys without applying any policy.
///
/// Tokens without a user key read as `Partial`.
///
/// # Errors
///
/// Returns a store error, or `CorruptRecord` when the user value is not a
/// valid `User`.
pub fn load_record(store: &dyn KeyValueStore) -> Result<StoredSession, AuthError> {
    let Some(raw_user) = store.get(USER_KEY)? else {
        if store.get(ACCESS_TOKEN_KEY)?.is_some() || store.get(REFRESH_TOKEN_KEY)?.is_some() {
            return Ok(StoredSession::Partial);
        }
        return Ok(StoredSession::Empty);
    };
    let Some(access_token) = store.get(ACCESS_TOKEN_KEY)? else {
        return Ok(StoredSession::Partial);
    };
    let refresh_token = store.get(REFRESH_TOKEN_KEY)?;

    let user: User = serde_json::from_str(&raw_user).map_err(|e| AuthError::CorruptRecord(e.to_string()))?;
    Ok(StoredSession::Complete(SessionRecord { user, access_token, refresh_token }))
}

/// Write the whole record in one batch.
///
/// A `None` refresh token is left unwritten: the key is already absent,
/// because the record was rehydrated without it.
///
/// # Errors
///
/// Returns an error if the user cannot be serialized or the store rejects
/// the batch.
pub fn save_record(store: &dyn KeyValueStore, record: &SessionRecord) -> Result<(), AuthError> {
    let user_json = serde_json::to_string(&record.user)?;
    let mut entries = vec![(USER_KEY, user_json.as_str()), (ACCESS_TOKEN_KEY, record.access_token.as_str())];
    if let Some(refresh) = record.refresh_token.as_deref() {
        entries.push((REFRESH_TOKEN_KEY, refresh));
    }
    store.set_many(&entries)?;
    debug!(user_id = record.user.id, "session record saved");
    Ok(())
}

/// Remove every session key in one batch.
///
/// # Errors
///
/// Returns an error if the store rejects the batch.
pub fn clear_record(store: &dyn KeyValueStore) -> Result<(), AuthError> {
    store.remove_many(&SESSION_KEYS)?;
    debug!("session record cleared");
    Ok(())
}

/// Load the record at startup, applying `policy` to unreadable data.
///
/// Partial records are cleared under either policy.
///
/// # Errors
///
/// Only under `RehydratePolicy::Strict`, when the record cannot be read.
pub fn rehydrate(store: &dyn KeyValueStore, policy: RehydratePolicy) -> Result<Option<SessionRecord>, AuthError> {
    match load_record(store) {
        Ok(StoredSession::Complete(record)) => Ok(Some(record)),
        Ok(StoredSession::Empty) => Ok(None),
        Ok(StoredSession::Partial) => {
            warn!("stored session record is incomplete; clearing it");
            clear_best_effort(store);
            Ok(None)
        }
        Err(e) if policy == RehydratePolicy::FailClosed => {
            warn!(error = %e, "stored session unreadable; starting signed out");
            clear_best_effort(store);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

fn clear_best_effort(store: &dyn KeyValueStore) {
    match clear_record(store) {
        Ok(()) => {}
        Err(AuthError::Store(StoreError::Format(e))) => {
            warn!(error = %e, "store contents unreadable; resetting store");
            if let Err(e) = store.reset() {
                warn!(error = %e, "failed to reset store");
            }
        }
        Err(e) => warn!(error = %e, "failed to clear stored session record"),
    }
}

#[cfg(test)]
#[path = "persistence_test.rs"]
mod tests;
