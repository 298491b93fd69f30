use async_trait::async_trait;
use secrecy::Secret;
use serde::Serialize;
use thiserror::Error;

use crate::domain::{
    outcome::ResponseMode, password::Password, session::Session, user::UserRecord,
};

#[derive(Debug, Error)]
pub enum HashError {
    #[error("Invalid hash parameters: {0}")]
    InvalidParameters(String),
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

/// Port trait for the password hashing primitive.
///
/// The work factor travels with every call. Records hashed with different work
/// factors can be verified concurrently without any shared hasher setting.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Derive the key for `password` with `salt`, returned in the encoding the
    /// store keeps in `derived_key`. `None` uses the hasher's default work factor.
    async fn hash(
        &self,
        password: &Password,
        salt: &str,
        work_factor: Option<u32>,
    ) -> Result<Secret<String>, HashError>;
}

/// Values handed to a view when it is rendered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewContext {
    pub title: String,
    pub basedir: String,
    /// Route the confirmation form posts back to.
    pub action: String,
    pub error: Option<String>,
    pub redirect: Option<String>,
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Unknown view: {0}")]
    UnknownView(String),
    #[error("Template error: {0}")]
    Template(String),
}

/// Port trait for turning a view identifier and its context into markup.
pub trait ViewRenderer: Send + Sync {
    fn render(&self, view: &str, context: &ViewContext) -> Result<String, RenderError>;
}

/// What to do once an account has been deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionAction {
    /// Respond with the "removed" view or JSON payload.
    Proceed,
    /// Send the user elsewhere.
    Redirect(String),
}

/// Request details available to a completion hook.
#[derive(Debug, Clone, Copy)]
pub struct CompletionContext<'a> {
    pub session: &'a Session,
    pub path: &'a str,
    pub mode: ResponseMode,
}

#[derive(Debug, Error)]
#[error("{0}")]
pub struct CompletionError(pub String);

/// Application callback run after the account was invalidated and the session
/// destroyed, before the response is produced.
#[async_trait]
pub trait CompletionHook: Send + Sync {
    async fn on_deleted(
        &self,
        user: &UserRecord,
        context: CompletionContext<'_>,
    ) -> Result<CompletionAction, CompletionError>;
}
