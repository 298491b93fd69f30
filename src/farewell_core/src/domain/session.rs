use std::fmt;

use serde::{Deserialize, Serialize};

use super::email::Email;

/// Opaque identifier of a server-side session, as carried by the session cookie.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The user a session was opened for, as far as the session knows it.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionUser {
    pub name: Option<String>,
    pub email: Option<Email>,
}

impl SessionUser {
    pub fn with_email(email: Email) -> Self {
        Self {
            name: None,
            email: Some(email),
        }
    }
}

/// A live session. A session may exist without a resolved user.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub id: SessionId,
    pub user: Option<SessionUser>,
}

impl Session {
    pub fn new(id: SessionId, user: Option<SessionUser>) -> Self {
        Self { id, user }
    }

    pub fn user_email(&self) -> Option<&Email> {
        self.user.as_ref()?.email.as_ref()
    }
}

/// Request extension inserted by the access-restriction middleware once the
/// session cookie resolved to a live session.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthenticatedSession(pub Session);
