//! Framework-agnostic account deletion handlers.
//!
//! These handlers contain the request logic without any framework dependencies.
//! Framework-specific routes extract data from requests, call these handlers,
//! and convert the results back to framework responses.

pub mod delete_account;
pub mod responder;

use farewell_application::DeleteAccountError;
use farewell_core::{CompletionError, RenderError};
use thiserror::Error;

pub use delete_account::{handle_delete_account, handle_show_delete_form};
pub use responder::{DelegatedOutcome, DeletionResponder, Reply, removal_cookie};

/// Failures that are not the user's fault and go to the host's error handling.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error(transparent)]
    DeleteAccount(#[from] DeleteAccountError),
    #[error("Completion hook failed: {0}")]
    Completion(#[from] CompletionError),
    #[error("View rendering failed: {0}")]
    Render(#[from] RenderError),
}
