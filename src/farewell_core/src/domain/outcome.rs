use std::fmt;

use super::deletion_form::DeletionRejection;

/// The error attached to a deletion attempt when it is reported to observers and
/// turned into a response.
#[derive(Debug, Clone, PartialEq)]
pub enum AttemptError {
    /// Shown back to the user with the confirmation form.
    Rejected(DeletionRejection),
    /// Store, hasher, session or completion failure. Never shown as a form error.
    Failed(String),
}

impl AttemptError {
    pub fn message(&self) -> String {
        match self {
            AttemptError::Rejected(rejection) => rejection.to_string(),
            AttemptError::Failed(message) => message.clone(),
        }
    }

    pub fn is_rejection(&self) -> bool {
        matches!(self, AttemptError::Rejected(_))
    }
}

impl fmt::Display for AttemptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl From<DeletionRejection> for AttemptError {
    fn from(rejection: DeletionRejection) -> Self {
        AttemptError::Rejected(rejection)
    }
}

/// How the outcome of a request is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseMode {
    /// Render the configured view.
    Html,
    /// REST clients get JSON bodies.
    Json,
    /// Response handling is disabled; the outcome is handed to the host's own
    /// middleware.
    Delegated,
}

impl ResponseMode {
    pub fn resolve(handle_response: bool, rest_configured: bool, rest_requested: bool) -> Self {
        if !handle_response {
            ResponseMode::Delegated
        } else if rest_configured || rest_requested {
            ResponseMode::Json
        } else {
            ResponseMode::Html
        }
    }
}
