//! In-memory blog store - used when no database is configured.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use quill_core::domain::{NewPost, Post, PostCard, PostUpdate, Tag};
use quill_core::error::RepoError;
use quill_core::ports::{PostRepository, TagRepository};

struct PostRow {
    id: i32,
    title: String,
    content: String,
    published: bool,
    created_at: DateTime<Utc>,
    /// Attached tags, in attachment order.
    tag_ids: Vec<i32>,
}

#[derive(Default)]
struct State {
    posts: Vec<PostRow>,
    tags: Vec<Tag>,
}

impl State {
    fn tag(&self, id: i32) -> Option<&Tag> {
        self.tags.iter().find(|t| t.id == id)
    }

    fn tag_ids(&mut self, names: &[String]) -> Vec<i32> {
        names
            .iter()
            .map(|name| match self.tags.iter().find(|t| &t.tag == name) {
                Some(existing) => existing.id,
                None => self.push_tag(name),
            })
            .collect()
    }

    fn push_tag(&mut self, text: &str) -> i32 {
        let id = self.tags.last().map_or(1, |t| t.id + 1);
        self.tags.push(Tag {
            id,
            tag: text.to_owned(),
            created_at: Utc::now(),
        });
        id
    }

    fn to_post(&self, row: &PostRow) -> Post {
        Post {
            id: row.id,
            title: row.title.clone(),
            content: row.content.clone(),
            published: row.published,
            created_at: row.created_at,
            tags: row
                .tag_ids
                .iter()
                .filter_map(|id| self.tag(*id).cloned())
                .collect(),
        }
    }
}

/// Blog store held in process memory behind an async `RwLock`.
///
/// Data is lost on process restart.
#[derive(Default)]
pub struct InMemoryBlogStore {
    state: RwLock<State>,
}

impl InMemoryBlogStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TagRepository for InMemoryBlogStore {
    async fn find_containing(&self, fragment: &str) -> Result<Vec<Tag>, RepoError> {
        let state = self.state.read().await;
        Ok(state
            .tags
            .iter()
            .filter(|t| t.matches(fragment))
            .cloned()
            .collect())
    }

    async fn insert(&self, text: &str) -> Result<Tag, RepoError> {
        let mut state = self.state.write().await;
        if state.tags.iter().any(|t| t.tag == text) {
            return Err(RepoError::Constraint(format!(
                "tag '{text}' already exists"
            )));
        }
        let id = state.push_tag(text);
        state.tag(id).cloned().ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl PostRepository for InMemoryBlogStore {
    async fn find_published_cards(
        &self,
        tag_filter: Option<&str>,
        limit: u64,
    ) -> Result<Vec<PostCard>, RepoError> {
        let state = self.state.read().await;

        let mut rows: Vec<&PostRow> = state
            .posts
            .iter()
            .filter(|p| p.published)
            .filter(|p| match tag_filter {
                Some(fragment) => p
                    .tag_ids
                    .iter()
                    .filter_map(|id| state.tag(*id))
                    .any(|t| t.matches(fragment)),
                None => true,
            })
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        Ok(rows
            .into_iter()
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .map(|row| PostCard::from(&state.to_post(row)))
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepoError> {
        let state = self.state.read().await;
        Ok(state
            .posts
            .iter()
            .find(|p| p.id == id)
            .map(|row| state.to_post(row)))
    }

    async fn insert(&self, post: NewPost) -> Result<Post, RepoError> {
        let mut state = self.state.write().await;
        let tag_ids = state.tag_ids(&post.tags);
        let id = state.posts.last().map_or(1, |p| p.id + 1);

        let row = PostRow {
            id,
            title: post.title,
            content: post.content,
            published: post.published,
            created_at: Utc::now(),
            tag_ids,
        };
        let stored = state.to_post(&row);
        state.posts.push(row);
        Ok(stored)
    }

    async fn update(&self, id: i32, update: PostUpdate) -> Result<Post, RepoError> {
        let mut state = self.state.write().await;
        let index = state
            .posts
            .iter()
            .position(|p| p.id == id)
            .ok_or(RepoError::NotFound)?;
        let tag_ids = update.tags.as_deref().map(|names| state.tag_ids(names));

        let row = &mut state.posts[index];
        row.title = update.title;
        row.content = update.content;
        row.published = update.published;
        if let Some(tag_ids) = tag_ids {
            row.tag_ids = tag_ids;
        }

        Ok(state.to_post(&state.posts[index]))
    }
}
