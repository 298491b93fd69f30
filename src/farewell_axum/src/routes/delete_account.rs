//! Axum-specific account deletion routes.
//!
//! Both routes expect the `restrict` middleware to run first and leave an
//! `AuthenticatedSession` in the request extensions. The deletion logic itself is
//! in the framework-agnostic handlers.

use std::{convert::Infallible, sync::Arc};

use axum::{
    Form, Json,
    extract::{FromRequest, Request, State},
    http::{StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use farewell_adapters::{
    config::{DeleteAccountConfig, REST_QUERY_FLAG},
    handlers::{self, DelegatedOutcome, DeletionResponder, HandlerError},
};
use farewell_application::{DeleteAccountUseCase, DeletionAttempt};
use farewell_core::{
    AttemptError, AuthenticatedSession, BaseQuery, DeletionForm, HttpRequest, PasswordHasher,
    ResponseMode, SessionStore, UserStore, ViewRenderer,
};
use thiserror::Error;

use crate::adapters::{AxumRequest, response_builder};

/// Shared state of the deletion routes.
pub struct DeleteAccountState<U, H, S, V>
where
    U: UserStore,
    H: PasswordHasher,
    S: SessionStore,
{
    use_case: Arc<DeleteAccountUseCase<U, H, S>>,
    responder: Arc<DeletionResponder<V>>,
}

impl<U, H, S, V> DeleteAccountState<U, H, S, V>
where
    U: UserStore,
    H: PasswordHasher,
    S: SessionStore,
    V: ViewRenderer,
{
    pub fn new(use_case: DeleteAccountUseCase<U, H, S>, responder: DeletionResponder<V>) -> Self {
        Self {
            use_case: Arc::new(use_case),
            responder: Arc::new(responder),
        }
    }
}

impl<U, H, S, V> Clone for DeleteAccountState<U, H, S, V>
where
    U: UserStore,
    H: PasswordHasher,
    S: SessionStore,
{
    fn clone(&self) -> Self {
        Self {
            use_case: self.use_case.clone(),
            responder: self.responder.clone(),
        }
    }
}

fn response_mode(config: &DeleteAccountConfig, request: &AxumRequest) -> ResponseMode {
    ResponseMode::resolve(
        config.handle_response(),
        config.is_rest(),
        request.has_query_flag(REST_QUERY_FLAG),
    )
}

/// `GET <route>`: the confirmation form.
#[tracing::instrument(name = "Show delete account form", skip_all)]
pub async fn show_delete_form<U, H, S, V>(
    State(state): State<DeleteAccountState<U, H, S, V>>,
    request: Request,
) -> Result<Response, DeleteAccountRouteError>
where
    U: UserStore,
    H: PasswordHasher,
    S: SessionStore,
    V: ViewRenderer,
{
    let request = AxumRequest(request);
    let mode = response_mode(state.responder.config(), &request);

    Ok(handlers::handle_show_delete_form(
        &*state.responder,
        mode,
        response_builder(),
    )?)
}

/// `POST <route>`: re-authenticate and delete the account.
///
/// A `BaseQuery` request extension, when an upstream layer set one, scopes the
/// user lookup.
#[tracing::instrument(name = "Delete Account", skip_all)]
pub async fn delete_account<U, H, S, V>(
    State(state): State<DeleteAccountState<U, H, S, V>>,
    request: Request,
) -> Result<Response, DeleteAccountRouteError>
where
    U: UserStore,
    H: PasswordHasher,
    S: SessionStore,
    V: ViewRenderer,
{
    let request = AxumRequest(request);
    let mode = response_mode(state.responder.config(), &request);
    let path = request.path().to_string();

    let extensions = request.0.extensions();
    let AuthenticatedSession(session) = extensions
        .get::<AuthenticatedSession>()
        .cloned()
        .ok_or(DeleteAccountRouteError::Unauthenticated)?;
    let base_query = extensions.get::<BaseQuery>().cloned().unwrap_or_default();

    let Ok(DeletionBody(form)) = DeletionBody::from_request(request.into_inner(), &()).await;

    let attempt = DeletionAttempt {
        form,
        session,
        base_query,
    };

    let response = handlers::handle_delete_account(
        &*state.use_case,
        &*state.responder,
        attempt,
        &path,
        mode,
        response_builder(),
    )
    .await?;

    Ok(response)
}

/// The deletion form, from a JSON or an url-encoded body.
///
/// A body that cannot be read counts as an empty form, so it ends up as a
/// "missing fields" rejection like any other incomplete submission.
pub struct DeletionBody(pub DeletionForm);

impl<S> FromRequest<S> for DeletionBody
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        let form = match content_type.as_deref() {
            Some(ct) if ct.starts_with("application/json") => {
                Json::<DeletionForm>::from_request(req, state)
                    .await
                    .map(|Json(form)| form)
                    .map_err(|e| e.body_text())
            }
            Some(_) => Form::<DeletionForm>::from_request(req, state)
                .await
                .map(|Form(form)| form)
                .map_err(|e| e.body_text()),
            None => Ok(DeletionForm::default()),
        };

        Ok(Self(form.unwrap_or_else(|error| {
            tracing::debug!(%error, "Unreadable deletion form");
            DeletionForm::default()
        })))
    }
}

/// Errors the deletion routes hand to the host.
#[derive(Debug, Error)]
pub enum DeleteAccountRouteError {
    #[error("Unauthorized")]
    Unauthenticated,

    #[error(transparent)]
    Failed(#[from] HandlerError),
}

impl IntoResponse for DeleteAccountRouteError {
    fn into_response(self) -> Response {
        match self {
            DeleteAccountRouteError::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                Json(serde_json::json!({ "error": "Unauthorized" })),
            )
                .into_response(),
            DeleteAccountRouteError::Failed(e) => {
                let message = e.to_string();
                let mut response = (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({ "error": message })),
                )
                    .into_response();
                response.extensions_mut().insert(DelegatedOutcome {
                    error: Some(AttemptError::Failed(message)),
                    view: None,
                    redirect: None,
                });
                response
            }
        }
    }
}
