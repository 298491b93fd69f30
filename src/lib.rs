//! # Farewell - self-service account deletion
//!
//! This is a facade crate that re-exports all public APIs from the farewell
//! components. Use this crate to get access to the whole deletion flow in one place.
//!
//! ## Usage
//!
//! Add to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! farewell = { path = "../farewell" }
//! ```
//!
//! ## Structure
//!
//! - **Core domain types**: `Email`, `Password`, `UserRecord`, `DeletionForm`, etc.
//! - **Ports**: `UserStore`, `SessionStore`, `PasswordHasher`, `ViewRenderer`,
//!   `DeletionObserver`, `CompletionHook`
//! - **Use case**: `DeleteAccountUseCase`
//! - **Adapters**: `HashMapUserStore`, `DashMapSessionStore`, `Argon2Hasher`,
//!   `AskamaViewRenderer`, `TracingObserver`
//! - **Axum integration**: `DeleteAccount` route builder and `restrict` middleware
//! - **Service**: `DeleteAccountService` for running the routes standalone

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use farewell_core::*;
}

pub use farewell_core::{
    AttemptError, AuthenticatedSession, BaseQuery, ConfirmationPhrase, DeletionForm,
    DeletionRejection, Email, LookupField, Password, ResponseMode, Session, SessionId,
    SessionUser, UserError, UserRecord,
};

// ============================================================================
// Ports
// ============================================================================

/// Store traits
pub mod repositories {
    pub use farewell_core::{SessionStore, SessionStoreError, UserStore, UserStoreError};
}

pub use farewell_core::{
    CompletionAction, CompletionContext, CompletionError, CompletionHook, DeletionEvent,
    DeletionObserver, HashError, PasswordHasher, RenderError, SessionStore, SessionStoreError,
    UserStore, UserStoreError, ViewContext, ViewRenderer,
};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use farewell_application::*;
}

pub use farewell_application::{
    DeleteAccountError, DeleteAccountUseCase, DeletionAttempt, DeletionOutcome,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// Framework-agnostic handlers
    pub mod handlers {
        pub use farewell_adapters::handlers::*;
    }

    /// Persistence implementations
    pub mod persistence {
        pub use farewell_adapters::persistence::*;
    }

    /// Password hashing
    pub mod hashing {
        pub use farewell_adapters::hashing::*;
    }

    /// View rendering
    pub mod views {
        pub use farewell_adapters::views::*;
    }

    /// Observers
    pub mod observers {
        pub use farewell_adapters::observers::*;
    }

    /// Configuration
    pub mod config {
        pub use farewell_adapters::config::*;
    }
}

pub use farewell_adapters::{
    config::{Completion, DeleteAccountConfig, DeleteAccountSettings},
    handlers::DelegatedOutcome,
    hashing::Argon2Hasher,
    observers::TracingObserver,
    persistence::{DashMapSessionStore, HashMapUserStore},
    views::AskamaViewRenderer,
};

// ============================================================================
// Axum integration and service
// ============================================================================

/// Axum routes and middleware
pub mod axum_integration {
    pub use farewell_axum::*;
}

pub use farewell_axum::{DeleteAccount, middleware::restrict};

pub use farewell_service::DeleteAccountService;

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing the port traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};

pub use axum;
pub use http;
pub use tokio;
