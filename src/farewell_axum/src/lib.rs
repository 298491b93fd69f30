//! Axum integration for the farewell account deletion library.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │  farewell_core: HTTP trait definitions   │
//! └──────────────┬───────────────────────────┘
//!                │
//!                ▼
//! ┌──────────────────────────────────────────┐
//! │  farewell_axum: Axum implementations     │
//! │  - AxumRequest newtype wrapper           │
//! │  - AxumResponseBuilder                   │
//! │  - restrict middleware                   │
//! │  - Axum route handlers                   │
//! └──────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use farewell_axum::DeleteAccount;
//!
//! let app = Router::new().merge(
//!     DeleteAccount::new(config, user_store, hasher, session_store, AskamaViewRenderer)
//!         .router(),
//! );
//! ```

pub mod adapters;
pub mod middleware;
pub mod router;
pub mod routes;

pub use adapters::{AxumRequest, AxumResponseBuilder, response_builder};
pub use router::DeleteAccount;
