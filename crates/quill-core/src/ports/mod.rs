//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that storage adapters must implement.

mod repository;

pub use repository::{PostRepository, TagRepository};
