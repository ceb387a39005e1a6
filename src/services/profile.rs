//! Profile form validation.
//!
//! Runs before `AuthService::update_profile` on the presentation side. The
//! session container itself accepts any patch.

use crate::types::{User, UserPatch};

/// Form field a validation message belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProfileField {
    Username,
    Email,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: ProfileField,
    pub message: &'static str,
}

/// Loose email shape check: some token of the form `x@y.z` with no
/// whitespace inside it.
#[must_use]
pub fn looks_like_email(value: &str) -> bool {
    value.split_whitespace().any(|word| {
        word.char_indices().any(|(at, c)| {
            if c != '@' || at == 0 {
                return false;
            }
            let domain = &word[at + 1..];
            domain
                .char_indices()
                .any(|(dot, c)| c == '.' && dot > 0 && dot + 1 < domain.len())
        })
    })
}

/// Validate the complete profile form.
///
/// Username and email are required; email must look like an address.
#[must_use]
pub fn validate_profile_form(username: &str, email: &str) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if username.is_empty() {
        errors.push(FieldError { field: ProfileField::Username, message: "Username is required" });
    }
    if email.is_empty() {
        errors.push(FieldError { field: ProfileField::Email, message: "Email is required" });
    } else if !looks_like_email(email) {
        errors.push(FieldError { field: ProfileField::Email, message: "Email is invalid" });
    }
    errors
}

/// Validate the form `patch` would produce when applied to `current`.
#[must_use]
pub fn validate_update(current: &User, patch: &UserPatch) -> Vec<FieldError> {
    let username = patch.username.as_deref().unwrap_or(current.username.as_str());
    let email = patch.email.as_deref().unwrap_or(current.email.as_str());
    validate_profile_form(username, email)
}

#[cfg(test)]
#[path = "profile_test.rs"]
mod tests;
