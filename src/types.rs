//! User records shared by the session container, the store, and the CLI.
//!
//! DESIGN
//! ======
//! `User` is serialized verbatim into the `user` store key, so field names
//! stay snake_case and absent names are omitted rather than written as null.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// The signed-in user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Numeric identifier. The mock verifier always assigns `1`.
    pub id: i64,
    /// Display handle.
    pub username: String,
    /// Email address used to sign in.
    pub email: String,
    /// Given name, if provided.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Family name, if provided.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

impl User {
    /// Shallow-merge `patch` into this user. Fields left as `None` in the
    /// patch keep their current value.
    pub fn apply(&mut self, patch: UserPatch) {
        let UserPatch { id, username, email, first_name, last_name } = patch;
        if let Some(id) = id {
            self.id = id;
        }
        if let Some(username) = username {
            self.username = username;
        }
        if let Some(email) = email {
            self.email = email;
        }
        if first_name.is_some() {
            self.first_name = first_name;
        }
        if last_name.is_some() {
            self.last_name = last_name;
        }
    }

    /// Return a copy of this user with `patch` applied.
    #[must_use]
    pub fn merged(&self, patch: UserPatch) -> Self {
        let mut next = self.clone();
        next.apply(patch);
        next
    }
}

/// Partial user update. `Some` overwrites, `None` preserves.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

impl UserPatch {
    /// True when the patch would not change anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.id.is_none()
            && self.username.is_none()
            && self.email.is_none()
            && self.first_name.is_none()
            && self.last_name.is_none()
    }
}
