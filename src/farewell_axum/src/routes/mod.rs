//! Axum-specific route handlers.
//!
//! These routes use Axum's extractors to get data from requests, call the
//! framework-agnostic handlers, and convert results to Axum responses.

pub mod delete_account;

pub use delete_account::{
    DeleteAccountRouteError, DeleteAccountState, DeletionBody, delete_account, show_delete_form,
};
