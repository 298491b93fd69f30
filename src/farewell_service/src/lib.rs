mod delete_account_service;
pub mod telemetry;

pub use delete_account_service::DeleteAccountService;
