mod delete_account;
mod helpers;
mod restrict;
