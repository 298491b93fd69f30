//! Settings / Configuration.
//!
//! Sources, later ones winning: `config/base.json`, `config/<environment>.json`
//! (environment from `FAREWELL_ENVIRONMENT`), then `FAREWELL_*` environment
//! variables with `__` between nested keys, e.g.
//! `FAREWELL_DELETE_ACCOUNT__HANDLE_RESPONSE=false`. A `.env` file is read first
//! when present. Every file is optional and every key has a default.

use config::{Config, Environment, File};
use secrecy::Secret;
use serde::Deserialize;
use thiserror::Error;

use super::{
    constants::{
        DEFAULT_LOGIN_ROUTE, DEFAULT_ROUTE, DEFAULT_SESSION_COOKIE, DEFAULT_TITLE,
        DEFAULT_VIEWS_BASEDIR, REMOVE_VIEW, REMOVED_VIEW, env, prod,
    },
    delete_account_config::{ConfigError, DeleteAccountConfig},
};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to load settings: {0}")]
    Load(#[from] config::ConfigError),
    #[error("Invalid settings: {0}")]
    Invalid(#[from] ConfigError),
}

/// Application settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeleteAccountSettings {
    #[serde(default)]
    pub delete_account: DeleteAccountSection,
    #[serde(default)]
    pub session: SessionSection,
    #[serde(default)]
    pub server: ServerSection,
    /// Account and session seeded at startup by the standalone binary.
    #[serde(default)]
    pub demo: Option<DemoAccount>,
}

/// Options of the deletion routes.
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteAccountSection {
    #[serde(default = "default_route")]
    pub route: String,
    /// Base path segment; setting it switches the routes to JSON.
    #[serde(default)]
    pub rest: Option<String>,
    #[serde(default, alias = "eventmsg", alias = "eventMessage")]
    pub event_message: Option<String>,
    #[serde(default = "default_true")]
    pub handle_response: bool,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub views: ViewsSection,
    #[serde(default = "default_basedir")]
    pub basedir: String,
    #[serde(default)]
    pub completion_route: Option<String>,
}

impl Default for DeleteAccountSection {
    fn default() -> Self {
        Self {
            route: default_route(),
            rest: None,
            event_message: None,
            handle_response: true,
            title: default_title(),
            views: ViewsSection::default(),
            basedir: default_basedir(),
            completion_route: None,
        }
    }
}

/// View identifiers. An empty string leaves the view unset.
#[derive(Debug, Clone, Deserialize)]
pub struct ViewsSection {
    #[serde(default = "default_remove_view")]
    pub remove: String,
    #[serde(default = "default_removed_view")]
    pub removed: String,
}

impl Default for ViewsSection {
    fn default() -> Self {
        Self {
            remove: default_remove_view(),
            removed: default_removed_view(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionSection {
    #[serde(default = "default_session_cookie")]
    pub cookie_name: String,
    #[serde(default = "default_login_route")]
    pub login_route: String,
}

impl Default for SessionSection {
    fn default() -> Self {
        Self {
            cookie_name: default_session_cookie(),
            login_route: default_login_route(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSection {
    #[serde(default = "default_address")]
    pub address: String,
    /// CORS origins allowed to call the routes; none disables CORS handling.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            address: default_address(),
            allowed_origins: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DemoAccount {
    pub email: String,
    pub password: Secret<String>,
    pub session_id: String,
    #[serde(default)]
    pub iterations: Option<u32>,
}

impl DeleteAccountSettings {
    pub fn load() -> Result<Self, SettingsError> {
        dotenvy::dotenv().ok();

        let environment =
            std::env::var(env::ENVIRONMENT_ENV_VAR).unwrap_or_else(|_| "local".to_string());

        let settings = Config::builder()
            .add_source(File::with_name("config/base").required(false))
            .add_source(File::with_name(&format!("config/{environment}")).required(false))
            .add_source(
                Environment::with_prefix(env::ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.allowed_origins")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// The validated route configuration these settings describe.
    pub fn delete_account_config(&self) -> Result<DeleteAccountConfig, SettingsError> {
        let section = &self.delete_account;

        let mut builder = DeleteAccountConfig::builder()
            .route(section.route.clone())
            .handle_response(section.handle_response)
            .title(section.title.clone())
            .remove_view(non_empty(&section.views.remove))
            .removed_view(non_empty(&section.views.removed))
            .basedir(section.basedir.clone())
            .session_cookie(self.session.cookie_name.clone())
            .login_route(self.session.login_route.clone());

        if let Some(rest) = &section.rest {
            builder = builder.rest(rest.clone());
        }
        if let Some(name) = &section.event_message {
            builder = builder.event_message(name.clone());
        }
        if let Some(path) = &section.completion_route {
            builder = builder.completion_route(path.clone());
        }

        Ok(builder.build()?)
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

fn default_route() -> String {
    DEFAULT_ROUTE.to_string()
}

fn default_true() -> bool {
    true
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

fn default_basedir() -> String {
    DEFAULT_VIEWS_BASEDIR.to_string()
}

fn default_remove_view() -> String {
    REMOVE_VIEW.to_string()
}

fn default_removed_view() -> String {
    REMOVED_VIEW.to_string()
}

fn default_session_cookie() -> String {
    DEFAULT_SESSION_COOKIE.to_string()
}

fn default_login_route() -> String {
    DEFAULT_LOGIN_ROUTE.to_string()
}

fn default_address() -> String {
    prod::APP_ADDRESS.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Completion;
    use config::FileFormat;

    fn from_json(json: &str) -> DeleteAccountSettings {
        Config::builder()
            .add_source(File::from_str(json, FileFormat::Json))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn empty_source_yields_defaults() {
        let settings = from_json("{}");
        let config = settings.delete_account_config().unwrap();

        assert_eq!(config.effective_route(), DEFAULT_ROUTE);
        assert!(config.handle_response());
        assert_eq!(config.session_cookie(), DEFAULT_SESSION_COOKIE);
        assert_eq!(settings.server.address, prod::APP_ADDRESS);
        assert!(settings.demo.is_none());
    }

    #[test]
    fn flat_delete_account_section() {
        let settings = from_json(
            r#"{
                "delete_account": {
                    "route": "/goodbye",
                    "rest": "api",
                    "event_message": "goodbye",
                    "handle_response": false,
                    "title": "Leave",
                    "views": { "remove": "", "removed": "custom/removed" },
                    "completion_route": "/farewell"
                },
                "session": { "cookie_name": "sid", "login_route": "/signin" }
            }"#,
        );
        let config = settings.delete_account_config().unwrap();

        assert_eq!(config.effective_route(), "/api/goodbye");
        assert_eq!(config.event_name(), "goodbye");
        assert!(!config.handle_response());
        assert_eq!(config.title(), "Leave");
        assert_eq!(config.remove_view(), None);
        assert_eq!(config.removed_view(), Some("custom/removed"));
        assert!(matches!(config.completion(), Completion::Redirect(path) if path == "/farewell"));
        assert_eq!(config.session_cookie(), "sid");
        assert_eq!(config.login_route(), "/signin");
    }

    #[test]
    fn event_message_accepts_short_key() {
        let settings = from_json(r#"{ "delete_account": { "eventmsg": "account_gone" } }"#);
        let config = settings.delete_account_config().unwrap();

        assert_eq!(config.event_name(), "account_gone");
    }

    #[test]
    fn invalid_route_is_reported() {
        let settings = from_json(r#"{ "delete_account": { "route": "nope" } }"#);
        assert!(matches!(
            settings.delete_account_config(),
            Err(SettingsError::Invalid(ConfigError::InvalidRoute(_)))
        ));
    }
}
