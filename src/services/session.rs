//! Opaque session tokens.
//!
//! DESIGN
//! ======
//! Tokens carry no claims and are never validated. They exist so the
//! persisted record has the same shape a real access/refresh pair would.

use std::fmt::Write;

use rand::Rng;

const ACCESS_TOKEN_PREFIX: &str = "mock-access-token-";
const REFRESH_TOKEN_PREFIX: &str = "mock-refresh-token-";

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Generate `prefix` followed by 16 random bytes as hex.
#[must_use]
pub fn generate_token(prefix: &str) -> String {
    let bytes: [u8; 16] = rand::rng().random();
    let mut token = String::with_capacity(prefix.len() + 32);
    token.push_str(prefix);
    token.push_str(&bytes_to_hex(&bytes));
    token
}

/// Access/refresh token pair handed out on register and login.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl TokenPair {
    /// Mint a fresh random pair.
    #[must_use]
    pub fn issue() -> Self {
        Self {
            access_token: generate_token(ACCESS_TOKEN_PREFIX),
            refresh_token: generate_token(REFRESH_TOKEN_PREFIX),
        }
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
