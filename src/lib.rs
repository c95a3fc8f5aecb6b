pub mod auth;
pub mod cache;
pub mod error;
pub mod models;
pub mod openapi;
pub mod pagination;
pub mod repo;
pub mod routes;

// Re-export commonly used items for tests / external users
pub use cache::PageCache;
pub use routes::{config, AppState};
