use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::user::UserRecord;

/// Request-scoped lookup filter placed on the request by upstream middleware,
/// typically to scope user lookups to one tenant. Every key must match the
/// corresponding field of a record for the record to be visible.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BaseQuery(Map<String, Value>);

impl BaseQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn matches(&self, user: &UserRecord) -> bool {
        self.0
            .iter()
            .all(|(key, expected)| user.field(key).as_ref() == Some(expected))
    }
}

impl From<Map<String, Value>> for BaseQuery {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_matches_everything() {
        let user = UserRecord::new("u-1", "jane@example.com", "salty-salt", "ab");
        assert!(BaseQuery::new().matches(&user));
    }

    #[test]
    fn every_key_must_match() {
        let user = UserRecord::new("u-1", "jane@example.com", "salty-salt", "ab")
            .with_attribute("tenant", "acme")
            .with_attribute("region", "eu");

        assert!(BaseQuery::new().with("tenant", "acme").matches(&user));
        assert!(
            BaseQuery::new()
                .with("tenant", "acme")
                .with("region", "eu")
                .matches(&user)
        );
        assert!(!BaseQuery::new().with("tenant", "globex").matches(&user));
        assert!(
            !BaseQuery::new()
                .with("tenant", "acme")
                .with("plan", "pro")
                .matches(&user)
        );
    }
}
