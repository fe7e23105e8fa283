//! # Quill Infrastructure
//!
//! Concrete implementations of the store ports defined in `quill-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory store only
//! - `postgres` - PostgreSQL store via SeaORM

pub mod database;
pub mod store;

// Re-exports - In-Memory
pub use database::DatabaseConfig;
pub use store::InMemoryBlogStore;

// Re-exports - PostgreSQL
#[cfg(feature = "postgres")]
pub use database::{PostgresPostRepository, PostgresTagRepository, connect};
