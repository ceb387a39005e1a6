//! Runtime configuration loaded from `AUTHDEMO_*` environment variables.
//!
//! Unset or unparseable values fall back to defaults; configuration loading
//! never fails.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;
use std::time::Duration;

use crate::services::auth::{AuthOptions, DEFAULT_LATENCY};
use crate::services::credentials::DEFAULT_ALLOWED_EMAILS;
use crate::services::persistence::RehydratePolicy;

pub const STORE_PATH_VAR: &str = "AUTHDEMO_STORE_PATH";
pub const LATENCY_MS_VAR: &str = "AUTHDEMO_LATENCY_MS";
pub const ALLOWED_EMAILS_VAR: &str = "AUTHDEMO_ALLOWED_EMAILS";
pub const STRICT_REHYDRATE_VAR: &str = "AUTHDEMO_STRICT_REHYDRATE";

const DEFAULT_STORE_PATH: &str = ".authdemo/session.json";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Location of the `FileStore` JSON file.
    pub store_path: PathBuf,
    /// Simulated round-trip time for register, login, and profile updates.
    pub latency: Duration,
    /// Emails accepted by the allow-list verifier.
    pub allowed_emails: Vec<String>,
    pub rehydrate: RehydratePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            latency: DEFAULT_LATENCY,
            allowed_emails: DEFAULT_ALLOWED_EMAILS.iter().map(|s| (*s).to_owned()).collect(),
            rehydrate: RehydratePolicy::default(),
        }
    }
}

impl Config {
    /// Load from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` in place of the process environment.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let store_path = lookup(STORE_PATH_VAR)
            .filter(|v| !v.trim().is_empty())
            .map_or(defaults.store_path, PathBuf::from);

        let latency = lookup(LATENCY_MS_VAR)
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map_or(defaults.latency, Duration::from_millis);

        let allowed_emails = lookup(ALLOWED_EMAILS_VAR)
            .map(|raw| parse_list(&raw))
            .filter(|list| !list.is_empty())
            .unwrap_or(defaults.allowed_emails);

        let rehydrate = match lookup(STRICT_REHYDRATE_VAR).as_deref().and_then(parse_bool) {
            Some(true) => RehydratePolicy::Strict,
            Some(false) | None => defaults.rehydrate,
        };

        Self { store_path, latency, allowed_emails, rehydrate }
    }

    #[must_use]
    pub fn auth_options(&self) -> AuthOptions {
        AuthOptions { latency: self.latency, rehydrate: self.rehydrate }
    }
}

pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}
