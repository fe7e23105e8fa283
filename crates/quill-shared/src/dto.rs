//! Data Transfer Objects - request bodies accepted by the API.
//!
//! Request types reject unknown fields, except the post edit body which
//! ignores them.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/insertPost`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InsertPostRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub published: Option<bool>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

/// Body of `POST /api/editPost/{postId}`. Absent fields keep their stored value.
///
/// Clients may echo back a whole stored post; fields other than the
/// writable ones are dropped.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EditPostRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub published: Option<bool>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

/// Query of `GET /api/search/tags`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TagSearchRequest {
    pub search_string: String,
}

/// Criteria for the combined post/tag search.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SnippetQuery {
    /// Any JSON number; whether it is whole is checked with the other rules.
    pub quantity: f64,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub keyword: Option<String>,
}

/// Body of `POST /api/search/multiSearch`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MultiSearchRequest {
    pub criteria: SnippetQuery,
}
