//! # Quill Core
//!
//! The domain layer of the Quill blog backend.
//! Posts, tags, the validation rules that guard them, the store ports
//! adapters must implement, and the services that orchestrate them.
//! No infrastructure dependencies live here.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;
pub mod validation;

pub use error::{DomainError, RepoError, ValidationError};
pub use services::{PostService, SearchService};
