//! # authdemo
//!
//! Mock authentication session for demo front-ends.
//!
//! `AuthService` holds the signed-in user and a pair of opaque tokens,
//! mirrors them into a durable key-value store, and publishes `AuthState`
//! snapshots for views to react to. Credentials are checked by a pluggable
//! `CredentialVerifier`; the bundled `AllowListVerifier` accepts a fixed set
//! of demo emails with any password. Nothing here is secure.

pub mod config;
pub mod error;
pub mod notify;
pub mod services;
pub mod state;
pub mod store;
pub mod types;

pub use config::Config;
pub use error::{AuthError, ErrorKind};
pub use notify::{ChannelNotifier, Notification, Notifier, Severity, TracingNotifier};
pub use services::auth::{AuthOptions, AuthService};
pub use services::credentials::{AllowListVerifier, AuthGrant, CredentialVerifier};
pub use services::persistence::RehydratePolicy;
pub use state::AuthState;
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use types::{User, UserPatch};
