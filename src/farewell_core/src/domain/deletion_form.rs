//! Input validation for the deletion form.
//!
//! Validation runs before any storage access. The checks are ordered and the first
//! failing one wins: missing fields, then the confirmation phrase, then the session
//! identity.

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use thiserror::Error;

use super::{email::Email, password::Password};

/// The literal a user has to type to confirm the deletion.
pub struct ConfirmationPhrase;

impl ConfirmationPhrase {
    pub const TEXT: &'static str = "DELETE ACCOUNT";

    /// Exact, case-sensitive comparison.
    pub fn matches(candidate: &str) -> bool {
        candidate == Self::TEXT
    }
}

/// Reasons a deletion request is turned away and shown the form again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DeletionRejection {
    #[error("All fields are required")]
    MissingFields,
    #[error("The phrase is incorrect")]
    IncorrectPhrase,
    #[error("Please enter your email address")]
    EmailMismatch,
    #[error("The password is incorrect")]
    IncorrectPassword,
}

impl DeletionRejection {
    /// Stable machine-readable code, used as the `error` field of JSON responses.
    pub fn code(&self) -> &'static str {
        match self {
            DeletionRejection::MissingFields => "missing_fields",
            DeletionRejection::IncorrectPhrase => "incorrect_phrase",
            DeletionRejection::EmailMismatch => "email_mismatch",
            DeletionRejection::IncorrectPassword => "incorrect_password",
        }
    }
}

/// The submitted form, as received. Every field may be absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeletionForm {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phrase: Option<String>,
    #[serde(default)]
    pub password: Option<Secret<String>>,
}

/// A form that passed every check that does not need the user store.
#[derive(Debug, Clone)]
pub struct ValidatedDeletion {
    pub email: Email,
    pub password: Password,
}

impl DeletionForm {
    pub fn new(
        email: impl Into<String>,
        phrase: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            email: Some(email.into()),
            phrase: Some(phrase.into()),
            password: Some(Secret::new(password.into())),
        }
    }

    /// Validate the form against the address of the logged-in user, if the session
    /// knows one.
    pub fn validate(
        self,
        session_email: Option<&Email>,
    ) -> Result<ValidatedDeletion, DeletionRejection> {
        let email = self.email.filter(|e| !e.is_empty());
        let phrase = self.phrase.filter(|p| !p.is_empty());
        let password = self.password.filter(|p| !p.expose_secret().is_empty());

        let (Some(email), Some(phrase), Some(password)) = (email, phrase, password) else {
            return Err(DeletionRejection::MissingFields);
        };

        if !ConfirmationPhrase::matches(&phrase) {
            return Err(DeletionRejection::IncorrectPhrase);
        }

        let email = Email::try_from(email).map_err(|_| DeletionRejection::MissingFields)?;
        if session_email.is_some_and(|expected| *expected != email) {
            return Err(DeletionRejection::EmailMismatch);
        }

        let password =
            Password::try_from(password).map_err(|_| DeletionRejection::MissingFields)?;

        Ok(ValidatedDeletion { email, password })
    }
}
