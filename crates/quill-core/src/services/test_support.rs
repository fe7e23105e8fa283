//! In-process store double for service tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{NewPost, Post, PostCard, PostUpdate, Tag, TagName};
use crate::error::RepoError;
use crate::ports::{PostRepository, TagRepository};

pub(crate) fn tag(id: i32, text: &str) -> Tag {
    Tag {
        id,
        tag: text.to_owned(),
        created_at: Utc::now(),
    }
}

pub(crate) fn card(id: i32, title: &str, tags: &[&str]) -> PostCard {
    PostCard {
        id,
        title: title.to_owned(),
        created_at: Utc::now(),
        tags: tags
            .iter()
            .map(|t| TagName {
                tag: (*t).to_owned(),
            })
            .collect(),
    }
}

/// Canned tags and cards, a mutable post list, and switchable failures.
#[derive(Default)]
pub(crate) struct StubStore {
    tags: Mutex<Vec<Tag>>,
    cards: Vec<PostCard>,
    posts: Mutex<Vec<Post>>,
    fail_tags: bool,
    fail_cards: bool,
    calls: AtomicUsize,
    card_filters: Mutex<Vec<Option<String>>>,
}

impl StubStore {
    pub(crate) fn new(tags: Vec<Tag>, cards: Vec<PostCard>) -> Self {
        Self {
            tags: Mutex::new(tags),
            cards,
            ..Default::default()
        }
    }

    pub(crate) fn with_posts(posts: Vec<Post>) -> Self {
        Self {
            posts: Mutex::new(posts),
            ..Default::default()
        }
    }

    pub(crate) fn failing_tags(mut self) -> Self {
        self.fail_tags = true;
        self
    }

    pub(crate) fn failing_cards(mut self) -> Self {
        self.fail_cards = true;
        self
    }

    /// Number of store calls made so far.
    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Filter passed to the most recent card query, if any was made.
    pub(crate) fn last_card_filter(&self) -> Option<Option<String>> {
        self.card_filters.lock().unwrap().last().cloned()
    }

    pub(crate) fn post(&self, id: i32) -> Option<Post> {
        self.posts.lock().unwrap().iter().find(|p| p.id == id).cloned()
    }

    fn record(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    fn resolve_tags(&self, names: &[String]) -> Vec<Tag> {
        let mut tags = self.tags.lock().unwrap();
        names
            .iter()
            .map(|name| match tags.iter().find(|t| &t.tag == name) {
                Some(existing) => existing.clone(),
                None => {
                    let created = tag(tags.len() as i32 + 1, name);
                    tags.push(created.clone());
                    created
                }
            })
            .collect()
    }
}

#[async_trait]
impl TagRepository for StubStore {
    async fn find_containing(&self, fragment: &str) -> Result<Vec<Tag>, RepoError> {
        self.record();
        if self.fail_tags {
            return Err(RepoError::Connection("stub store offline".to_owned()));
        }
        Ok(self
            .tags
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.matches(fragment))
            .cloned()
            .collect())
    }

    async fn insert(&self, text: &str) -> Result<Tag, RepoError> {
        self.record();
        let mut tags = self.tags.lock().unwrap();
        if tags.iter().any(|t| t.tag == text) {
            return Err(RepoError::Constraint(format!("tag '{text}' already exists")));
        }
        let created = tag(tags.len() as i32 + 1, text);
        tags.push(created.clone());
        Ok(created)
    }
}

#[async_trait]
impl PostRepository for StubStore {
    async fn find_published_cards(
        &self,
        tag_filter: Option<&str>,
        limit: u64,
    ) -> Result<Vec<PostCard>, RepoError> {
        self.record();
        self.card_filters
            .lock()
            .unwrap()
            .push(tag_filter.map(str::to_owned));
        if self.fail_cards {
            return Err(RepoError::Query("stub store offline".to_owned()));
        }
        Ok(self
            .cards
            .iter()
            .filter(|c| match tag_filter {
                Some(f) => c
                    .tags
                    .iter()
                    .any(|t| crate::domain::contains_ignore_case(&t.tag, f)),
                None => true,
            })
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepoError> {
        self.record();
        Ok(self.post(id))
    }

    async fn insert(&self, post: NewPost) -> Result<Post, RepoError> {
        self.record();
        let tags = self.resolve_tags(&post.tags);
        let mut posts = self.posts.lock().unwrap();
        let stored = Post {
            id: posts.len() as i32 + 1,
            title: post.title,
            content: post.content,
            published: post.published,
            created_at: Utc::now(),
            tags,
        };
        posts.push(stored.clone());
        Ok(stored)
    }

    async fn update(&self, id: i32, update: PostUpdate) -> Result<Post, RepoError> {
        self.record();
        let tags = update.tags.as_deref().map(|names| self.resolve_tags(names));
        let mut posts = self.posts.lock().unwrap();
        let post = posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(RepoError::NotFound)?;
        post.title = update.title;
        post.content = update.content;
        post.published = update.published;
        if let Some(tags) = tags {
            post.tags = tags;
        }
        Ok(post.clone())
    }
}
