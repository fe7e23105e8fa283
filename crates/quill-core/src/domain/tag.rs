use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Tag entity - a short label attachable to posts, unique by text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: i32,
    pub tag: String,
    pub created_at: DateTime<Utc>,
}

impl Tag {
    pub fn matches(&self, fragment: &str) -> bool {
        contains_ignore_case(&self.tag, fragment)
    }
}

/// Case-insensitive substring test. The empty needle matches everything.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
