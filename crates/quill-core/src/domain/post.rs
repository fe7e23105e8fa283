use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Tag;

/// Post entity - a blog entry with its associated tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub tags: Vec<Tag>,
}

impl Post {
    /// Overlay a patch on the stored values, producing the row to write back.
    pub fn apply(&self, patch: PostPatch) -> PostUpdate {
        PostUpdate {
            title: patch.title.unwrap_or_else(|| self.title.clone()),
            content: patch.content.unwrap_or_else(|| self.content.clone()),
            published: patch.published.unwrap_or(self.published),
            tags: patch.tags,
        }
    }
}

/// Tag text as carried on a card, without identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagName {
    pub tag: String,
}

/// Summary projection of a post for list and search results.
/// Never exposes content or publication state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostCard {
    pub id: i32,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub tags: Vec<TagName>,
}

impl From<&Post> for PostCard {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id,
            title: post.title.clone(),
            created_at: post.created_at,
            tags: post
                .tags
                .iter()
                .map(|t| TagName { tag: t.tag.clone() })
                .collect(),
        }
    }
}

/// Combined answer of the snippet search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub post_cards: Vec<PostCard>,
    pub post_tags: Vec<Tag>,
}

/// Raw criteria of a snippet search, before validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnippetCriteria {
    /// Requested number of cards; must be a whole number.
    pub quantity: f64,
    pub tags: Option<Vec<String>>,
    pub keyword: Option<String>,
}

/// A post that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub published: bool,
    /// Tag names, connected if they exist and created otherwise.
    pub tags: Vec<String>,
}

/// Partial edit of a stored post.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub published: Option<bool>,
    pub tags: Option<Vec<String>>,
}

/// Full set of writable columns for an existing post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostUpdate {
    pub title: String,
    pub content: String,
    pub published: bool,
    /// `Some` replaces the tag set entirely; `None` leaves it untouched.
    pub tags: Option<Vec<String>>,
}
