pub mod dashmap_session_store;
pub mod hashmap_user_store;

pub use dashmap_session_store::DashMapSessionStore;
pub use hashmap_user_store::HashMapUserStore;
