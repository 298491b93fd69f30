pub mod constants;
pub mod delete_account_config;
pub mod settings;

pub use constants::*;
pub use delete_account_config::{
    Completion, ConfigError, DeleteAccountConfig, DeleteAccountConfigBuilder,
};
pub use settings::{
    DeleteAccountSection, DeleteAccountSettings, DemoAccount, ServerSection, SessionSection,
    SettingsError,
};
