use secrecy::{ExposeSecret, Secret};

use super::user::UserError;

/// A password candidate typed by the user to re-authenticate.
#[derive(Debug, Clone)]
pub struct Password(Secret<String>);

impl AsRef<Secret<String>> for Password {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

impl TryFrom<Secret<String>> for Password {
    type Error = UserError;

    fn try_from(value: Secret<String>) -> Result<Self, Self::Error> {
        if value.expose_secret().is_empty() {
            return Err(UserError::MissingPassword);
        }
        Ok(Self(value))
    }
}
