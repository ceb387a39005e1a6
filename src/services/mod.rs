//! Session services.
//!
//! ARCHITECTURE
//! ============
//! `auth` owns the session state container. The remaining modules are the
//! pieces it composes: credential checks, token minting, record persistence,
//! and profile form validation.

pub mod auth;
pub mod credentials;
pub mod persistence;
pub mod profile;
pub mod session;
