use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    base_query::BaseQuery,
    session::{Session, SessionId},
    user::{LookupField, UserRecord},
};

// UserStore port trait and errors
#[derive(Debug, Error)]
pub enum UserStoreError {
    #[error("User not found")]
    UserNotFound,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for UserStoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::UserNotFound, Self::UserNotFound) => true,
            (Self::UnexpectedError(_), Self::UnexpectedError(_)) => true,
            _ => false,
        }
    }
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Find the single record whose `field` equals `value` and that matches every
    /// key of `filter`.
    async fn find(
        &self,
        field: LookupField,
        value: &str,
        filter: &BaseQuery,
    ) -> Result<UserRecord, UserStoreError>;

    /// Persist `user`, replacing the stored record with the same id.
    async fn update(&self, user: &UserRecord) -> Result<(), UserStoreError>;
}

// SessionStore port trait and errors
#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("Session not found")]
    SessionNotFound,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self, id: &SessionId) -> Result<Option<Session>, SessionStoreError>;
    async fn destroy(&self, id: &SessionId) -> Result<(), SessionStoreError>;
}
