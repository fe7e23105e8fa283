//! Post service - creation, editing, publication and retrieval of posts.

use std::sync::Arc;

use super::store_failure;
use crate::domain::{NewPost, Post, PostPatch, Tag};
use crate::error::{DomainError, RepoError};
use crate::ports::{PostRepository, TagRepository};
use crate::validation;

/// Service for single-post operations and tag creation.
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    tags: Arc<dyn TagRepository>,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostRepository>, tags: Arc<dyn TagRepository>) -> Self {
        Self { posts, tags }
    }

    /// Validate and store a new post. Unknown tag names are created.
    pub async fn insert_post(&self, mut post: NewPost) -> Result<Post, DomainError> {
        validation::post_fields(&post.title, &post.content, &post.tags)
            .inspect_err(|e| tracing::debug!(reason = %e, "Rejected new post"))?;
        post.tags = validation::dedup_tags(post.tags);

        let stored = self
            .posts
            .insert(post)
            .await
            .map_err(store_failure("insert_post"))?;

        tracing::info!(post_id = stored.id, tags = stored.tags.len(), "Post created");
        Ok(stored)
    }

    /// Merge `patch` over the stored post, validate the result and write it back.
    pub async fn edit_post(&self, id: i32, patch: PostPatch) -> Result<Post, DomainError> {
        let existing = self
            .posts
            .find_by_id(id)
            .await
            .map_err(store_failure("edit_post"))?
            .ok_or(DomainError::NotFound {
                entity_type: "Post",
                id,
            })?;

        let mut update = existing.apply(patch);
        validation::post_fields(
            &update.title,
            &update.content,
            update.tags.as_deref().unwrap_or_default(),
        )?;
        update.tags = update.tags.map(validation::dedup_tags);

        let updated = self.posts.update(id, update).await.map_err(|e| match e {
            RepoError::NotFound => DomainError::NotFound {
                entity_type: "Post",
                id,
            },
            other => store_failure("edit_post")(other),
        })?;

        tracing::info!(post_id = id, published = updated.published, "Post updated");
        Ok(updated)
    }

    /// Mark a post as published, leaving everything else as stored.
    pub async fn publish_post(&self, id: i32) -> Result<Post, DomainError> {
        self.edit_post(
            id,
            PostPatch {
                published: Some(true),
                ..Default::default()
            },
        )
        .await
    }

    /// Fetch a published post. Drafts are reported as missing.
    pub async fn get_post_by_id(&self, id: i32) -> Result<Post, DomainError> {
        self.posts
            .find_by_id(id)
            .await
            .map_err(store_failure("get_post_by_id"))?
            .filter(|p| p.published)
            .ok_or(DomainError::NotFound {
                entity_type: "Post",
                id,
            })
    }

    pub async fn insert_tag(&self, tag: &str) -> Result<Tag, DomainError> {
        validation::TAG
            .check(tag)
            .inspect_err(|e| tracing::debug!(reason = %e, "Rejected tag"))?;

        let stored = self
            .tags
            .insert(tag)
            .await
            .map_err(store_failure("insert_tag"))?;

        tracing::info!(tag_id = stored.id, "Tag created");
        Ok(stored)
    }
}
