//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::ports::{PostRepository, TagRepository};
use quill_core::{PostService, SearchService};
use quill_infra::{DatabaseConfig, InMemoryBlogStore};

#[cfg(feature = "postgres")]
use quill_infra::{PostgresPostRepository, PostgresTagRepository};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub search: Arc<SearchService>,
    pub posts: Arc<PostService>,
}

impl AppState {
    /// Build the application state with appropriate store implementations.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        #[cfg(feature = "postgres")]
        let state = match db_config {
            Some(config) => match quill_infra::connect(config).await {
                Ok(conn) => Self::with_stores(
                    Arc::new(PostgresTagRepository::new(conn.clone())),
                    Arc::new(PostgresPostRepository::new(conn)),
                ),
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                    Self::in_memory()
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                Self::in_memory()
            }
        };

        #[cfg(not(feature = "postgres"))]
        let state = {
            let _ = db_config;
            tracing::info!("Running without postgres feature - using in-memory store");
            Self::in_memory()
        };

        tracing::info!("Application state initialized");
        state
    }

    pub fn in_memory() -> Self {
        let store = Arc::new(InMemoryBlogStore::new());
        Self::with_stores(store.clone(), store)
    }

    /// Wire the services over the given stores.
    pub fn with_stores(tags: Arc<dyn TagRepository>, posts: Arc<dyn PostRepository>) -> Self {
        Self {
            search: Arc::new(SearchService::new(tags.clone(), posts.clone())),
            posts: Arc::new(PostService::new(posts, tags)),
        }
    }
}
