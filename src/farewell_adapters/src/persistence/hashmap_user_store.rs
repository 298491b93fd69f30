use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use farewell_core::{BaseQuery, LookupField, UserRecord, UserStore, UserStoreError};
use serde_json::Value;

/// In-memory user store keyed by record id.
#[derive(Default, Clone)]
pub struct HashMapUserStore {
    users: Arc<RwLock<HashMap<String, UserRecord>>>,
}

impl HashMapUserStore {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn insert(&self, user: UserRecord) {
        let mut users = self.users.write().await;
        users.insert(user.id().to_string(), user);
    }

    pub async fn get(&self, id: &str) -> Option<UserRecord> {
        self.users.read().await.get(id).cloned()
    }
}

#[async_trait::async_trait]
impl UserStore for HashMapUserStore {
    #[tracing::instrument(name = "Finding user in memory", skip_all, fields(field = %field))]
    async fn find(
        &self,
        field: LookupField,
        value: &str,
        filter: &BaseQuery,
    ) -> Result<UserRecord, UserStoreError> {
        let expected = Value::String(value.to_string());
        let users = self.users.read().await;
        users
            .values()
            .find(|user| {
                user.field(field.as_str()).as_ref() == Some(&expected) && filter.matches(user)
            })
            .cloned()
            .ok_or(UserStoreError::UserNotFound)
    }

    #[tracing::instrument(name = "Updating user in memory", skip_all)]
    async fn update(&self, user: &UserRecord) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        let stored = users
            .get_mut(user.id())
            .ok_or(UserStoreError::UserNotFound)?;
        *stored = user.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::Fake;
    use fake::faker::internet::en::SafeEmail;

    fn user(id: &str, email: &str, tenant: &str) -> UserRecord {
        UserRecord::new(id, email, "salty-salt", "00ff").with_attribute("tenant", tenant)
    }

    #[tokio::test]
    async fn find_by_email() {
        let store = HashMapUserStore::new();
        let email: String = SafeEmail().fake();
        store.insert(user("u-1", &email, "acme")).await;

        let found = store
            .find(LookupField::Email, &email, &BaseQuery::new())
            .await
            .unwrap();
        assert_eq!(found.id(), "u-1");

        let missing = store
            .find(LookupField::Email, "nobody@example.com", &BaseQuery::new())
            .await;
        assert_eq!(missing.unwrap_err(), UserStoreError::UserNotFound);
    }

    #[tokio::test]
    async fn find_respects_base_query() {
        let store = HashMapUserStore::new();
        store.insert(user("u-1", "jane@example.com", "acme")).await;
        store.insert(user("u-2", "jane@example.com", "globex")).await;

        let found = store
            .find(
                LookupField::Email,
                "jane@example.com",
                &BaseQuery::new().with("tenant", "globex"),
            )
            .await
            .unwrap();
        assert_eq!(found.id(), "u-2");
    }

    #[tokio::test]
    async fn update_replaces_record_and_hides_it_from_email_lookups() {
        let store = HashMapUserStore::new();
        let email: String = SafeEmail().fake();
        store.insert(user("u-1", &email, "acme")).await;

        let mut record = store
            .find(LookupField::Email, &email, &BaseQuery::new())
            .await
            .unwrap();
        record.invalidate();
        store.update(&record).await.unwrap();

        assert!(store.get("u-1").await.unwrap().is_invalidated());
        assert_eq!(
            store
                .find(LookupField::Email, &email, &BaseQuery::new())
                .await
                .unwrap_err(),
            UserStoreError::UserNotFound
        );
        assert!(
            store
                .find(LookupField::Id, "u-1", &BaseQuery::new())
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn update_of_unknown_record_fails() {
        let store = HashMapUserStore::new();
        let result = store.update(&user("u-9", "x@example.com", "acme")).await;
        assert_eq!(result.unwrap_err(), UserStoreError::UserNotFound);
    }
}
