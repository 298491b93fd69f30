use std::sync::Arc;

use dashmap::DashMap;
use farewell_core::{Session, SessionId, SessionStore, SessionStoreError, SessionUser};

/// In-memory session store.
#[derive(Default, Clone)]
pub struct DashMapSessionStore {
    sessions: Arc<DashMap<SessionId, Option<SessionUser>>>,
}

impl DashMapSessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a session with a freshly generated id.
    pub fn open(&self, user: Option<SessionUser>) -> SessionId {
        let id = SessionId::new(uuid::Uuid::new_v4().to_string());
        self.sessions.insert(id.clone(), user);
        id
    }

    pub fn insert(&self, session: Session) {
        self.sessions.insert(session.id, session.user);
    }

    pub fn contains(&self, id: &SessionId) -> bool {
        self.sessions.contains_key(id)
    }
}

#[async_trait::async_trait]
impl SessionStore for DashMapSessionStore {
    async fn load(&self, id: &SessionId) -> Result<Option<Session>, SessionStoreError> {
        Ok(self
            .sessions
            .get(id)
            .map(|entry| Session::new(id.clone(), entry.value().clone())))
    }

    /// Removing an id that is not stored is a no-op.
    #[tracing::instrument(name = "Destroying session in memory", skip_all)]
    async fn destroy(&self, id: &SessionId) -> Result<(), SessionStoreError> {
        if self.sessions.remove(id).is_none() {
            tracing::debug!("Session already destroyed");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use farewell_core::Email;

    #[tokio::test]
    async fn open_load_destroy() {
        let store = DashMapSessionStore::new();
        let email = Email::try_from("jane@example.com".to_string()).unwrap();
        let id = store.open(Some(SessionUser::with_email(email.clone())));

        let session = store.load(&id).await.unwrap().unwrap();
        assert_eq!(session.user_email(), Some(&email));

        store.destroy(&id).await.unwrap();
        assert!(!store.contains(&id));
        assert!(store.load(&id).await.unwrap().is_none());
        store.destroy(&id).await.unwrap();
    }
}
