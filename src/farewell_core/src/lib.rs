pub mod domain;
pub mod http_abstraction;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    base_query::BaseQuery,
    deletion_form::{ConfirmationPhrase, DeletionForm, DeletionRejection, ValidatedDeletion},
    email::Email,
    outcome::{AttemptError, ResponseMode},
    password::Password,
    session::{AuthenticatedSession, Session, SessionId, SessionUser},
    user::{LookupField, UserError, UserRecord},
};

pub use ports::{
    observers::{DeletionEvent, DeletionObserver},
    repositories::{SessionStore, SessionStoreError, UserStore, UserStoreError},
    services::{
        CompletionAction, CompletionContext, CompletionError, CompletionHook, HashError,
        PasswordHasher, RenderError, ViewContext, ViewRenderer,
    },
};

pub use http_abstraction::{HttpRequest, ResponseBuilder, ResponseHelpers};
