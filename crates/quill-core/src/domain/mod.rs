//! Domain entities - the core business objects.

mod post;
mod tag;

pub use post::{
    NewPost, Post, PostCard, PostPatch, PostUpdate, SearchResult, SnippetCriteria, TagName,
};
pub use tag::{Tag, contains_ignore_case};
