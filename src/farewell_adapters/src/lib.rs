//! Infrastructure adapters for the account deletion flow.
//!
//! - `config`: settings loading and the validated `DeleteAccountConfig`
//! - `handlers`: framework-agnostic request handlers and response emission
//! - `hashing`: argon2 implementation of `PasswordHasher`
//! - `observers`: stock `DeletionObserver` implementations
//! - `persistence`: in-memory `UserStore` and `SessionStore`
//! - `views`: askama implementation of `ViewRenderer`

pub mod config;
pub mod handlers;
pub mod hashing;
pub mod observers;
pub mod persistence;
pub mod views;
