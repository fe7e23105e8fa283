//! Services - orchestrate validation and store access for each operation.

mod post_service;
mod search_service;

#[cfg(test)]
mod test_support;

pub use post_service::PostService;
pub use search_service::SearchService;

use crate::error::{DomainError, RepoError};

/// Convert a store failure at an operation boundary, logging the detail.
fn store_failure(operation: &'static str) -> impl FnOnce(RepoError) -> DomainError {
    move |err| match err {
        RepoError::Constraint(detail) => {
            tracing::debug!(operation, %detail, "Constraint violation");
            DomainError::Duplicate(detail)
        }
        other => {
            tracing::error!(operation, error = %other, "Store operation failed");
            DomainError::Internal(operation)
        }
    }
}
