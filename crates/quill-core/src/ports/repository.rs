use async_trait::async_trait;

use crate::domain::{NewPost, Post, PostCard, PostUpdate, Tag};
use crate::error::RepoError;

/// Tag store.
#[async_trait]
pub trait TagRepository: Send + Sync {
    /// Every tag whose text contains `fragment`, ignoring case.
    /// The empty fragment matches all tags.
    async fn find_containing(&self, fragment: &str) -> Result<Vec<Tag>, RepoError>;

    /// Insert a new tag. Existing text yields `RepoError::Constraint`.
    async fn insert(&self, tag: &str) -> Result<Tag, RepoError>;
}

/// Post store.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Cards for published posts, newest first, at most `limit` of them.
    ///
    /// With `tag_filter`, only posts having a tag whose text contains it
    /// (ignoring case) are returned.
    async fn find_published_cards(
        &self,
        tag_filter: Option<&str>,
        limit: u64,
    ) -> Result<Vec<PostCard>, RepoError>;

    /// Find a post by id, published or not, with its tags.
    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepoError>;

    /// Store a post, connecting existing tags by exact text and creating the rest.
    async fn insert(&self, post: NewPost) -> Result<Post, RepoError>;

    /// Overwrite a post's columns; replaces its tag set when `update.tags` is set.
    async fn update(&self, id: i32, update: PostUpdate) -> Result<Post, RepoError>;
}
