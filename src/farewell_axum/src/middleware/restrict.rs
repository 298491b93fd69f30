//! Access restriction for the deletion routes.
//!
//! Only requests carrying a session cookie that resolves to a live session get
//! through. The session is handed to the routes as an `AuthenticatedSession`
//! request extension.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use farewell_adapters::config::{DeleteAccountConfig, REST_QUERY_FLAG};
use farewell_core::{
    AuthenticatedSession, HttpRequest, ResponseBuilder, ResponseHelpers, SessionId,
    SessionStore,
};

use crate::adapters::{AxumRequest, response_builder};

/// State of the `restrict` middleware.
pub struct RestrictState<S> {
    session_store: S,
    config: Arc<DeleteAccountConfig>,
}

impl<S> RestrictState<S> {
    pub fn new(session_store: S, config: Arc<DeleteAccountConfig>) -> Self {
        Self {
            session_store,
            config,
        }
    }
}

impl<S: Clone> Clone for RestrictState<S> {
    fn clone(&self) -> Self {
        Self {
            session_store: self.session_store.clone(),
            config: self.config.clone(),
        }
    }
}

/// Reject requests without a live session.
///
/// REST requests get a 401 JSON body, browsers are sent to the login route with
/// the requested URL in the `redirect` query parameter.
#[tracing::instrument(name = "Restrict", skip_all)]
pub async fn restrict<S>(
    State(state): State<RestrictState<S>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response
where
    S: SessionStore + Clone + 'static,
{
    let session = match jar.get(state.config.session_cookie()) {
        Some(cookie) => {
            let id = SessionId::new(cookie.value());
            match state.session_store.load(&id).await {
                Ok(session) => session,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to load session");
                    return response_builder()
                        .status(500)
                        .json_body(serde_json::json!({ "error": e.to_string() }))
                        .build();
                }
            }
        }
        None => None,
    };

    match session {
        Some(session) => {
            request
                .extensions_mut()
                .insert(AuthenticatedSession(session));
            next.run(request).await
        }
        None => deny(&state.config, AxumRequest(request)),
    }
}

fn deny(config: &DeleteAccountConfig, request: AxumRequest) -> Response {
    if config.is_rest() || request.has_query_flag(REST_QUERY_FLAG) {
        tracing::debug!(path = request.path(), "Unauthenticated REST request");
        return response_builder().unauthorized("Unauthorized");
    }

    let location = format!(
        "{}?redirect={}",
        config.login_route(),
        request.original_url()
    );
    tracing::debug!(%location, "Unauthenticated request, redirecting to login");
    response_builder().see_other(&location)
}
