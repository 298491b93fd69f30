pub mod env {
    pub const ENV_PREFIX: &str = "FAREWELL";
    pub const ENVIRONMENT_ENV_VAR: &str = "FAREWELL_ENVIRONMENT";
}

pub const DEFAULT_ROUTE: &str = "/deleteaccount";
pub const DEFAULT_TITLE: &str = "Delete Account";
pub const DEFAULT_SESSION_COOKIE: &str = "farewell.sid";
pub const DEFAULT_LOGIN_ROUTE: &str = "/login";
pub const DEFAULT_VIEWS_BASEDIR: &str = "views";

/// Built-in view identifiers understood by `AskamaViewRenderer`.
pub const REMOVE_VIEW: &str = "delete_account/remove";
pub const REMOVED_VIEW: &str = "delete_account/removed";

/// Query flag that switches a single request to JSON responses.
pub const REST_QUERY_FLAG: &str = "rest";

pub const CONFIRMATION_PHRASE: &str = farewell_core::ConfirmationPhrase::TEXT;

pub const MISSING_VIEW_MARKUP: &str = "<p>No file has been set in the configuration for this view path.</p><p>Please make sure you set a valid file for the \"deleteAccount.views\" configuration.</p>";

pub mod prod {
    pub const APP_ADDRESS: &str = "0.0.0.0:3000";
}

pub mod test {
    pub const APP_ADDRESS: &str = "127.0.0.1:0";
}
