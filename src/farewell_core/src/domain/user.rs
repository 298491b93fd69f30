use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserError {
    #[error("Email is required")]
    MissingEmail,
    #[error("Password is required")]
    MissingPassword,
}

/// Field a user store is asked to match on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupField {
    Id,
    Email,
}

impl LookupField {
    pub fn as_str(&self) -> &'static str {
        match self {
            LookupField::Id => "_id",
            LookupField::Email => "email",
        }
    }
}

impl std::fmt::Display for LookupField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored user as handed out by a `UserStore`.
///
/// The record belongs to the store. The deletion flow reads `salt`, `derived_key` and
/// `iterations`, and only ever writes the two account flags and the removal of
/// `email`. Every other attribute the store keeps is carried in `attributes` and
/// written back untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(rename = "_id")]
    id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    salt: String,
    derived_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    iterations: Option<u32>,
    #[serde(rename = "accountLocked", default)]
    account_locked: bool,
    #[serde(rename = "accountInvalid", default)]
    account_invalid: bool,
    #[serde(flatten)]
    attributes: Map<String, Value>,
}

impl UserRecord {
    pub fn new(
        id: impl Into<String>,
        email: impl Into<String>,
        salt: impl Into<String>,
        derived_key: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            email: Some(email.into()),
            salt: salt.into(),
            derived_key: derived_key.into(),
            iterations: None,
            account_locked: false,
            account_invalid: false,
            attributes: Map::new(),
        }
    }

    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = Some(iterations);
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn salt(&self) -> &str {
        &self.salt
    }

    pub fn derived_key(&self) -> &str {
        &self.derived_key
    }

    /// Hash work factor recorded alongside the key, if the store keeps one.
    /// A stored zero counts as unset.
    pub fn iterations(&self) -> Option<u32> {
        self.iterations.filter(|n| *n > 0)
    }

    pub fn account_locked(&self) -> bool {
        self.account_locked
    }

    pub fn account_invalid(&self) -> bool {
        self.account_invalid
    }

    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    /// Value of a named field, looking at the well-known fields first and the
    /// store-specific attributes second. Used by stores to evaluate lookups and
    /// base-query filters.
    pub fn field(&self, name: &str) -> Option<Value> {
        match name {
            "_id" | "id" => Some(Value::String(self.id.clone())),
            "email" => self.email.clone().map(Value::String),
            "salt" => Some(Value::String(self.salt.clone())),
            "derived_key" => Some(Value::String(self.derived_key.clone())),
            "iterations" => self.iterations.map(Value::from),
            "accountLocked" => Some(Value::Bool(self.account_locked)),
            "accountInvalid" => Some(Value::Bool(self.account_invalid)),
            other => self.attributes.get(other).cloned(),
        }
    }

    /// Lock and invalidate the account and drop its email address. Lookups by
    /// email no longer find the record afterwards.
    pub fn invalidate(&mut self) {
        self.account_locked = true;
        self.account_invalid = true;
        self.email = None;
    }

    pub fn is_invalidated(&self) -> bool {
        self.account_locked && self.account_invalid && self.email.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record() -> UserRecord {
        UserRecord::new("u-1", "jane@example.com", "salty-salt", "abcdef")
            .with_iterations(3)
            .with_attribute("tenant", "acme")
    }

    #[test]
    fn invalidate_sets_flags_and_removes_email() {
        let mut user = record();
        assert!(!user.is_invalidated());

        user.invalidate();

        assert!(user.account_locked());
        assert!(user.account_invalid());
        assert_eq!(user.email(), None);
        assert!(user.is_invalidated());
        assert_eq!(user.field("tenant"), Some(json!("acme")));
    }

    #[test]
    fn invalidated_record_serializes_without_email() {
        let mut user = record();
        user.invalidate();

        let value = serde_json::to_value(&user).unwrap();
        assert!(value.get("email").is_none());
        assert_eq!(value["accountLocked"], json!(true));
        assert_eq!(value["accountInvalid"], json!(true));
        assert_eq!(value["tenant"], json!("acme"));
    }

    #[test]
    fn deserializes_store_documents() {
        let user: UserRecord = serde_json::from_value(json!({
            "_id": "u-2",
            "email": "joe@example.com",
            "salt": "pepper-salt",
            "derived_key": "0011",
            "iterations": 10,
            "name": "joe"
        }))
        .unwrap();

        assert_eq!(user.id(), "u-2");
        assert_eq!(user.iterations(), Some(10));
        assert!(!user.account_locked());
        assert_eq!(user.field("name"), Some(json!("joe")));
        assert_eq!(user.field(LookupField::Email.as_str()), Some(json!("joe@example.com")));
    }

    #[test]
    fn zero_iterations_fall_back_to_default_work_factor() {
        let user: UserRecord = serde_json::from_value(json!({
            "_id": "u-3",
            "email": "ann@example.com",
            "salt": "s",
            "derived_key": "00",
            "iterations": 0
        }))
        .unwrap();

        assert_eq!(user.iterations(), None);
        assert_eq!(record().with_iterations(0).iterations(), None);
    }
}
