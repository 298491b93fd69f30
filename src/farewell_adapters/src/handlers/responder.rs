//! Response emission shared by both deletion routes.
//!
//! Every request is reported to the observers exactly once, after its response
//! is produced. The response takes one of three shapes depending on the
//! `ResponseMode`: a delegated bare response for the host's middleware, a JSON
//! body, or a rendered view. A view that fails to render is reported as a failure.

use std::sync::Arc;

use axum_extra::extract::cookie::{Cookie, SameSite};
use farewell_core::{
    AttemptError, DeletionEvent, DeletionObserver, DeletionRejection, ResponseBuilder,
    ResponseHelpers, ResponseMode, UserRecord, ViewContext, ViewRenderer,
};
use serde_json::json;

use super::HandlerError;
use crate::config::{DeleteAccountConfig, MISSING_VIEW_MARKUP};

/// Attached to the response extensions when response handling is disabled, so the
/// host's middleware can decide what the user sees.
#[derive(Debug, Clone, PartialEq)]
pub struct DelegatedOutcome {
    pub error: Option<AttemptError>,
    pub view: Option<String>,
    pub redirect: Option<String>,
}

/// What a route wants to answer, before it is shaped for the response mode.
#[derive(Debug, Clone)]
pub struct Reply<'a> {
    pub error: Option<DeletionRejection>,
    pub view: Option<&'a str>,
    pub user: Option<&'a UserRecord>,
    pub redirect: Option<String>,
    /// Expire the session cookie; set once the session was destroyed.
    pub clear_session: bool,
}

impl<'a> Reply<'a> {
    pub fn view(view: Option<&'a str>) -> Self {
        Self {
            error: None,
            view,
            user: None,
            redirect: None,
            clear_session: false,
        }
    }

    pub fn rejected(
        reason: DeletionRejection,
        view: Option<&'a str>,
        user: Option<&'a UserRecord>,
    ) -> Self {
        Self {
            error: Some(reason),
            user,
            ..Self::view(view)
        }
    }

    pub fn completed(view: Option<&'a str>, user: &'a UserRecord, redirect: Option<String>) -> Self {
        Self {
            user: Some(user),
            redirect,
            clear_session: true,
            ..Self::view(view)
        }
    }
}

pub struct DeletionResponder<V> {
    config: Arc<DeleteAccountConfig>,
    renderer: V,
    observers: Vec<Arc<dyn DeletionObserver>>,
    event_name: String,
}

impl<V> DeletionResponder<V>
where
    V: ViewRenderer,
{
    pub fn new(
        config: Arc<DeleteAccountConfig>,
        renderer: V,
        observers: Vec<Arc<dyn DeletionObserver>>,
    ) -> Self {
        let event_name = config.event_name();
        Self {
            config,
            renderer,
            observers,
            event_name,
        }
    }

    pub fn config(&self) -> &DeleteAccountConfig {
        &self.config
    }

    pub fn event_name(&self) -> &str {
        &self.event_name
    }

    fn notify(
        &self,
        error: Option<&AttemptError>,
        view: Option<&str>,
        user: Option<&UserRecord>,
        mode: ResponseMode,
    ) {
        let event = DeletionEvent {
            name: &self.event_name,
            error,
            view,
            user,
            mode,
        };
        for observer in &self.observers {
            observer.notify(&event);
        }
    }

    /// Report an infrastructure failure. The error itself is returned to the caller
    /// and ends up in the host's error handling, no response is produced here.
    pub fn notify_failure(&self, error: &HandlerError, user: Option<&UserRecord>, mode: ResponseMode) {
        let error = AttemptError::Failed(error.to_string());
        self.notify(Some(&error), None, user, mode);
    }

    pub fn respond<B>(
        &self,
        reply: Reply<'_>,
        mode: ResponseMode,
        builder: B,
    ) -> Result<B::Response, HandlerError>
    where
        B: ResponseBuilder,
    {
        let error = reply.error.map(AttemptError::Rejected);
        let (view, user) = (reply.view, reply.user);

        match self.shape(reply, error.clone(), mode, builder) {
            Ok(response) => {
                self.notify(error.as_ref(), view, user, mode);
                Ok(response)
            }
            Err(e) => {
                self.notify_failure(&e, user, mode);
                Err(e)
            }
        }
    }

    fn shape<B>(
        &self,
        reply: Reply<'_>,
        error: Option<AttemptError>,
        mode: ResponseMode,
        builder: B,
    ) -> Result<B::Response, HandlerError>
    where
        B: ResponseBuilder,
    {
        let builder = if reply.clear_session {
            builder.cookie(&removal_cookie(self.config.session_cookie()).to_string())
        } else {
            builder
        };

        match mode {
            ResponseMode::Delegated => {
                let status = if error.is_some() { 400 } else { 204 };
                Ok(builder
                    .status(status)
                    .extension(DelegatedOutcome {
                        error,
                        view: reply.view.map(String::from),
                        redirect: reply.redirect,
                    })
                    .build())
            }
            ResponseMode::Json => Ok(match reply.error {
                Some(reason) => builder.forbidden(&reason.to_string(), reason.code()),
                None => {
                    let mut body = json!({ "result": true });
                    if let Some(redirect) = reply.redirect {
                        body["redirect"] = json!(redirect);
                    }
                    builder.ok_json(body)
                }
            }),
            ResponseMode::Html => {
                if let (None, Some(location)) = (&error, &reply.redirect) {
                    return Ok(builder.see_other(location));
                }

                let Some(view) = reply.view else {
                    tracing::warn!(event = %self.event_name, "No view configured");
                    return Ok(builder
                        .status(404)
                        .html_body(MISSING_VIEW_MARKUP.to_string())
                        .build());
                };

                let context = ViewContext {
                    title: self.config.title().to_string(),
                    basedir: self.config.basedir().to_string(),
                    action: self.config.effective_route(),
                    error: error.as_ref().map(AttemptError::message),
                    redirect: reply.redirect,
                };
                let html = self.renderer.render(view, &context)?;
                Ok(builder.ok_html(html))
            }
        }
    }
}

pub fn removal_cookie(cookie_name: &str) -> Cookie<'static> {
    let mut cookie = Cookie::build((cookie_name.to_string(), String::new()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();
    cookie.make_removal();
    cookie
}
