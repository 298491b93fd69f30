use std::sync::Arc;

use axum::{Router, middleware::from_fn_with_state, routing::get};
use farewell_adapters::{
    config::DeleteAccountConfig, handlers::DeletionResponder, observers::TracingObserver,
};
use farewell_application::DeleteAccountUseCase;
use farewell_core::{DeletionObserver, PasswordHasher, SessionStore, UserStore, ViewRenderer};

use crate::{
    middleware::{RestrictState, restrict},
    routes::{DeleteAccountState, delete_account, show_delete_form},
};

/// Builder for the account deletion routes.
///
/// ```ignore
/// let router = DeleteAccount::new(config, user_store, hasher, session_store, AskamaViewRenderer)
///     .observer(|event: &DeletionEvent<'_>| audit(event))
///     .router();
/// ```
///
/// A `TracingObserver` is registered by default.
pub struct DeleteAccount<U, H, S, V> {
    config: DeleteAccountConfig,
    user_store: U,
    hasher: H,
    session_store: S,
    renderer: V,
    observers: Vec<Arc<dyn DeletionObserver>>,
}

impl<U, H, S, V> DeleteAccount<U, H, S, V>
where
    U: UserStore + 'static,
    H: PasswordHasher + 'static,
    S: SessionStore + Clone + 'static,
    V: ViewRenderer + 'static,
{
    pub fn new(
        config: DeleteAccountConfig,
        user_store: U,
        hasher: H,
        session_store: S,
        renderer: V,
    ) -> Self {
        Self {
            config,
            user_store,
            hasher,
            session_store,
            renderer,
            observers: vec![Arc::new(TracingObserver)],
        }
    }

    /// Register an additional observer, notified after the ones already registered.
    pub fn observer(mut self, observer: impl DeletionObserver + 'static) -> Self {
        self.observers.push(Arc::new(observer));
        self
    }

    /// Replace every registered observer, the default one included.
    pub fn with_observers(mut self, observers: Vec<Arc<dyn DeletionObserver>>) -> Self {
        self.observers = observers;
        self
    }

    pub fn config(&self) -> &DeleteAccountConfig {
        &self.config
    }

    /// `GET` and `POST` on the effective route, both behind `restrict`.
    pub fn router(self) -> Router {
        let route = self.config.effective_route();
        let config = Arc::new(self.config);

        let restrict_state = RestrictState::new(self.session_store.clone(), config.clone());
        let state = DeleteAccountState::new(
            DeleteAccountUseCase::new(self.user_store, self.hasher, self.session_store),
            DeletionResponder::new(config, self.renderer, self.observers),
        );

        tracing::debug!(%route, "Mounting account deletion routes");

        Router::new()
            .route(
                &route,
                get(show_delete_form::<U, H, S, V>).post(delete_account::<U, H, S, V>),
            )
            .route_layer(from_fn_with_state(restrict_state, restrict::<S>))
            .with_state(state)
    }
}
