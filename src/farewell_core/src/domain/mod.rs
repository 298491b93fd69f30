pub mod base_query;
pub mod deletion_form;
pub mod email;
pub mod outcome;
pub mod password;
pub mod session;
pub mod user;
