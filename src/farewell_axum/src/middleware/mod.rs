//! Middleware guarding the deletion routes.

pub mod restrict;

pub use restrict::{RestrictState, restrict};
