use farewell_core::{
    BaseQuery, DeletionForm, DeletionRejection, Email, HashError, LookupField, Password,
    PasswordHasher, Session, SessionStore, SessionStoreError, UserRecord, UserStore,
    UserStoreError,
};
use secrecy::ExposeSecret;

/// Error types for delete account use case
///
/// These are infrastructure failures. A user typing the wrong phrase or password is
/// not an error here, it is a `DeletionOutcome::Rejected`.
#[derive(Debug, thiserror::Error)]
pub enum DeleteAccountError {
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
    #[error("Password hashing error: {0}")]
    HashError(#[from] HashError),
    #[error("Session store error: {0}")]
    SessionStoreError(#[from] SessionStoreError),
}

/// Everything one POST to the deletion route carries.
#[derive(Debug, Clone)]
pub struct DeletionAttempt {
    pub form: DeletionForm,
    /// The session the restriction middleware resolved for this request.
    pub session: Session,
    /// Lookup scope injected by upstream middleware; empty when there is none.
    pub base_query: BaseQuery,
}

/// Terminal states of a deletion attempt that did not hit an infrastructure error.
#[derive(Debug, Clone, PartialEq)]
pub enum DeletionOutcome {
    /// Nothing was written. `user` is set once the record has been looked up.
    Rejected {
        reason: DeletionRejection,
        user: Option<UserRecord>,
    },
    /// The record was invalidated and persisted, and the session destroyed.
    Completed { user: UserRecord },
}

/// Delete account use case - re-authenticates the user, then invalidates the
/// stored record and ends the session.
///
/// The steps run strictly in order and each one short-circuits the rest:
/// validate the form, look the user up, verify the password, commit the
/// invalidation, destroy the session. A failure after the commit leaves the
/// record invalidated; nothing is rolled back.
pub struct DeleteAccountUseCase<U, H, S>
where
    U: UserStore,
    H: PasswordHasher,
    S: SessionStore,
{
    user_store: U,
    hasher: H,
    session_store: S,
}

impl<U, H, S> DeleteAccountUseCase<U, H, S>
where
    U: UserStore,
    H: PasswordHasher,
    S: SessionStore,
{
    pub fn new(user_store: U, hasher: H, session_store: S) -> Self {
        Self {
            user_store,
            hasher,
            session_store,
        }
    }

    pub fn user_store(&self) -> &U {
        &self.user_store
    }

    pub fn session_store(&self) -> &S {
        &self.session_store
    }

    /// Execute the delete account use case
    ///
    /// # Returns
    /// `DeletionOutcome` for completed and rejected attempts, or `DeleteAccountError`
    /// when a store, the hasher or the session store failed
    #[tracing::instrument(
        name = "DeleteAccountUseCase::execute",
        skip_all,
        fields(session = %attempt.session.id)
    )]
    pub async fn execute(
        &self,
        attempt: DeletionAttempt,
    ) -> Result<DeletionOutcome, DeleteAccountError> {
        let DeletionAttempt {
            form,
            session,
            base_query,
        } = attempt;

        let request = match form.validate(session.user_email()) {
            Ok(request) => request,
            Err(reason) => {
                tracing::debug!(%reason, "Deletion form rejected");
                return Ok(DeletionOutcome::Rejected { reason, user: None });
            }
        };

        let mut user = self.lookup(&request.email, &base_query).await?;

        if !self.verify(&request.password, &user).await? {
            return Ok(DeletionOutcome::Rejected {
                reason: DeletionRejection::IncorrectPassword,
                user: Some(user),
            });
        }

        self.commit(&mut user).await?;
        self.teardown(&session).await?;

        Ok(DeletionOutcome::Completed { user })
    }

    #[tracing::instrument(name = "Looking up user", skip_all)]
    async fn lookup(
        &self,
        email: &Email,
        base_query: &BaseQuery,
    ) -> Result<UserRecord, DeleteAccountError> {
        Ok(self
            .user_store
            .find(LookupField::Email, email.as_str(), base_query)
            .await?)
    }

    #[tracing::instrument(name = "Verifying password", skip_all)]
    async fn verify(
        &self,
        password: &Password,
        user: &UserRecord,
    ) -> Result<bool, DeleteAccountError> {
        let derived_key = self
            .hasher
            .hash(password, user.salt(), user.iterations())
            .await?;

        Ok(derived_key.expose_secret() == user.derived_key())
    }

    #[tracing::instrument(name = "Invalidating user", skip_all, fields(user = %user.id()))]
    async fn commit(&self, user: &mut UserRecord) -> Result<(), DeleteAccountError> {
        user.invalidate();
        self.user_store.update(user).await?;
        Ok(())
    }

    #[tracing::instrument(name = "Destroying session", skip_all)]
    async fn teardown(&self, session: &Session) -> Result<(), DeleteAccountError> {
        match self.session_store.destroy(&session.id).await {
            Ok(()) => Ok(()),
            // Ended elsewhere (logout, concurrent deletion) between lookup and commit.
            Err(SessionStoreError::SessionNotFound) => {
                tracing::debug!("Session was already gone");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}
