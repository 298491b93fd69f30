use std::fmt;
use std::sync::Arc;

use farewell_core::CompletionHook;
use thiserror::Error;

use super::constants::{
    DEFAULT_LOGIN_ROUTE, DEFAULT_ROUTE, DEFAULT_SESSION_COOKIE, DEFAULT_TITLE,
    DEFAULT_VIEWS_BASEDIR, REMOVE_VIEW, REMOVED_VIEW,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Route must start with '/': {0}")]
    InvalidRoute(String),
    #[error("REST segment must be a single path segment: {0}")]
    InvalidRestSegment(String),
    #[error("Completion route must not be empty")]
    EmptyCompletionRoute,
    #[error("Session cookie name must not be empty")]
    EmptySessionCookie,
}

/// What happens after a successful deletion.
#[derive(Clone, Default)]
pub enum Completion {
    /// Respond with the "removed" view or JSON payload.
    #[default]
    Render,
    /// Redirect to a fixed path.
    Redirect(String),
    /// Ask the application.
    Hook(Arc<dyn CompletionHook>),
}

impl fmt::Debug for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Completion::Render => f.write_str("Render"),
            Completion::Redirect(path) => f.debug_tuple("Redirect").field(path).finish(),
            Completion::Hook(_) => f.write_str("Hook(..)"),
        }
    }
}

/// Static configuration of the deletion routes. Immutable once built.
///
/// | option            | default            |
/// |-------------------|--------------------|
/// | `route`           | `/deleteaccount`   |
/// | `rest`            | none (HTML mode)   |
/// | `event_message`   | the effective route|
/// | `handle_response` | `true`             |
/// | `title`           | `Delete Account`   |
/// | `views.remove`    | built-in form      |
/// | `views.removed`   | built-in page      |
/// | `completion`      | render             |
#[derive(Debug, Clone)]
pub struct DeleteAccountConfig {
    route: String,
    rest: Option<String>,
    event_message: Option<String>,
    handle_response: bool,
    title: String,
    remove_view: Option<String>,
    removed_view: Option<String>,
    basedir: String,
    completion: Completion,
    session_cookie: String,
    login_route: String,
}

impl Default for DeleteAccountConfig {
    fn default() -> Self {
        Self {
            route: DEFAULT_ROUTE.to_string(),
            rest: None,
            event_message: None,
            handle_response: true,
            title: DEFAULT_TITLE.to_string(),
            remove_view: Some(REMOVE_VIEW.to_string()),
            removed_view: Some(REMOVED_VIEW.to_string()),
            basedir: DEFAULT_VIEWS_BASEDIR.to_string(),
            completion: Completion::Render,
            session_cookie: DEFAULT_SESSION_COOKIE.to_string(),
            login_route: DEFAULT_LOGIN_ROUTE.to_string(),
        }
    }
}

impl DeleteAccountConfig {
    pub fn builder() -> DeleteAccountConfigBuilder {
        DeleteAccountConfigBuilder {
            config: Self::default(),
        }
    }

    /// The route both endpoints are mounted on, `/<rest><route>` in REST mode.
    pub fn effective_route(&self) -> String {
        match &self.rest {
            Some(rest) => format!("/{rest}{}", self.route),
            None => self.route.clone(),
        }
    }

    pub fn event_name(&self) -> String {
        self.event_message
            .clone()
            .unwrap_or_else(|| self.effective_route())
    }

    pub fn route(&self) -> &str {
        &self.route
    }

    pub fn rest(&self) -> Option<&str> {
        self.rest.as_deref()
    }

    pub fn is_rest(&self) -> bool {
        self.rest.is_some()
    }

    pub fn handle_response(&self) -> bool {
        self.handle_response
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn remove_view(&self) -> Option<&str> {
        self.remove_view.as_deref()
    }

    pub fn removed_view(&self) -> Option<&str> {
        self.removed_view.as_deref()
    }

    pub fn basedir(&self) -> &str {
        &self.basedir
    }

    pub fn completion(&self) -> &Completion {
        &self.completion
    }

    pub fn session_cookie(&self) -> &str {
        &self.session_cookie
    }

    pub fn login_route(&self) -> &str {
        &self.login_route
    }
}

pub struct DeleteAccountConfigBuilder {
    config: DeleteAccountConfig,
}

impl DeleteAccountConfigBuilder {
    pub fn route(mut self, route: impl Into<String>) -> Self {
        self.config.route = route.into();
        self
    }

    pub fn rest(mut self, rest: impl Into<String>) -> Self {
        self.config.rest = Some(rest.into());
        self
    }

    pub fn event_message(mut self, name: impl Into<String>) -> Self {
        self.config.event_message = Some(name.into());
        self
    }

    pub fn handle_response(mut self, handle_response: bool) -> Self {
        self.config.handle_response = handle_response;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.config.title = title.into();
        self
    }

    /// `None` leaves the view unset; requests that would render it get the
    /// diagnostic 404 page instead.
    pub fn remove_view(mut self, view: Option<String>) -> Self {
        self.config.remove_view = view;
        self
    }

    pub fn removed_view(mut self, view: Option<String>) -> Self {
        self.config.removed_view = view;
        self
    }

    pub fn basedir(mut self, basedir: impl Into<String>) -> Self {
        self.config.basedir = basedir.into();
        self
    }

    pub fn completion_route(mut self, path: impl Into<String>) -> Self {
        self.config.completion = Completion::Redirect(path.into());
        self
    }

    pub fn completion_hook(mut self, hook: Arc<dyn CompletionHook>) -> Self {
        self.config.completion = Completion::Hook(hook);
        self
    }

    pub fn session_cookie(mut self, name: impl Into<String>) -> Self {
        self.config.session_cookie = name.into();
        self
    }

    pub fn login_route(mut self, route: impl Into<String>) -> Self {
        self.config.login_route = route.into();
        self
    }

    pub fn build(self) -> Result<DeleteAccountConfig, ConfigError> {
        let config = self.config;

        if !config.route.starts_with('/') {
            return Err(ConfigError::InvalidRoute(config.route));
        }
        if let Some(rest) = &config.rest {
            if rest.is_empty() || rest.contains('/') {
                return Err(ConfigError::InvalidRestSegment(rest.clone()));
            }
        }
        if matches!(&config.completion, Completion::Redirect(path) if path.is_empty()) {
            return Err(ConfigError::EmptyCompletionRoute);
        }
        if config.session_cookie.is_empty() {
            return Err(ConfigError::EmptySessionCookie);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = DeleteAccountConfig::builder().build().unwrap();
        assert_eq!(config.effective_route(), "/deleteaccount");
        assert_eq!(config.event_name(), "/deleteaccount");
        assert!(config.handle_response());
        assert!(!config.is_rest());
        assert_eq!(config.title(), "Delete Account");
        assert_eq!(config.remove_view(), Some(REMOVE_VIEW));
        assert_eq!(config.removed_view(), Some(REMOVED_VIEW));
        assert!(matches!(config.completion(), Completion::Render));
    }

    #[test]
    fn rest_prefixes_the_route() {
        let config = DeleteAccountConfig::builder()
            .route("/remove-me")
            .rest("api")
            .build()
            .unwrap();
        assert_eq!(config.effective_route(), "/api/remove-me");
        assert_eq!(config.event_name(), "/api/remove-me");
    }

    #[test]
    fn event_message_overrides_the_route() {
        let config = DeleteAccountConfig::builder()
            .event_message("account-deleted")
            .build()
            .unwrap();
        assert_eq!(config.event_name(), "account-deleted");
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert_eq!(
            DeleteAccountConfig::builder()
                .route("deleteaccount")
                .build()
                .unwrap_err(),
            ConfigError::InvalidRoute("deleteaccount".to_string())
        );
        assert_eq!(
            DeleteAccountConfig::builder()
                .rest("api/v1")
                .build()
                .unwrap_err(),
            ConfigError::InvalidRestSegment("api/v1".to_string())
        );
        assert_eq!(
            DeleteAccountConfig::builder()
                .completion_route("")
                .build()
                .unwrap_err(),
            ConfigError::EmptyCompletionRoute
        );
    }
}
