//! Validation rules for incoming data.
//!
//! Rules are plain constants; each `check` reports the first violated bound.
//! Text lengths count characters, not bytes.

use crate::domain::SnippetCriteria;
use crate::error::ValidationError;

#[derive(Debug, Clone, Copy)]
struct Bound<N> {
    limit: N,
    message: &'static str,
}

/// Length constraint on a text field.
#[derive(Debug, Clone, Copy)]
pub struct TextRule {
    min: Option<Bound<usize>>,
    max: Option<Bound<usize>>,
}

impl TextRule {
    pub const fn unbounded() -> Self {
        Self {
            min: None,
            max: None,
        }
    }

    pub const fn at_least(mut self, limit: usize, message: &'static str) -> Self {
        self.min = Some(Bound { limit, message });
        self
    }

    pub const fn at_most(mut self, limit: usize, message: &'static str) -> Self {
        self.max = Some(Bound { limit, message });
        self
    }

    pub fn check(&self, value: &str) -> Result<(), ValidationError> {
        let len = value.chars().count();
        if let Some(min) = self.min.filter(|b| len < b.limit) {
            return Err(ValidationError::new(min.message));
        }
        if let Some(max) = self.max.filter(|b| len > b.limit) {
            return Err(ValidationError::new(max.message));
        }
        Ok(())
    }
}

/// Range constraint on an integer field.
#[derive(Debug, Clone, Copy)]
pub struct IntRule {
    whole: Option<&'static str>,
    min: Option<Bound<i64>>,
    max: Option<Bound<i64>>,
}

impl IntRule {
    pub const fn unbounded() -> Self {
        Self {
            whole: None,
            min: None,
            max: None,
        }
    }

    /// Reject numbers with a fractional part in `check_number`.
    pub const fn whole(mut self, message: &'static str) -> Self {
        self.whole = Some(message);
        self
    }

    pub const fn at_least(mut self, limit: i64, message: &'static str) -> Self {
        self.min = Some(Bound { limit, message });
        self
    }

    pub const fn at_most(mut self, limit: i64, message: &'static str) -> Self {
        self.max = Some(Bound { limit, message });
        self
    }

    pub fn check(&self, value: i64) -> Result<(), ValidationError> {
        if let Some(min) = self.min.filter(|b| value < b.limit) {
            return Err(ValidationError::new(min.message));
        }
        if let Some(max) = self.max.filter(|b| value > b.limit) {
            return Err(ValidationError::new(max.message));
        }
        Ok(())
    }

    /// Check a JSON number, returning it as an integer.
    pub fn check_number(&self, value: f64) -> Result<i64, ValidationError> {
        let fractional = !value.is_finite() || value.fract() != 0.0;
        if let Some(message) = self.whole.filter(|_| fractional) {
            return Err(ValidationError::new(message));
        }
        // Saturates outside the i64 range, so the bounds still apply
        let value = value as i64;
        self.check(value)?;
        Ok(value)
    }
}

pub const TITLE: TextRule = TextRule::unbounded()
    .at_least(2, "Title must be at least 2 characters")
    .at_most(128, "Title cannot exceed 128 characters");

pub const CONTENT: TextRule =
    TextRule::unbounded().at_least(16, "Content must be at least 16 characters");

pub const TAG: TextRule = TextRule::unbounded()
    .at_least(1, "Tag name is required")
    .at_most(32, "Tag is too long. Maximum length is 32");

pub const SEARCH_STRING: TextRule = TextRule::unbounded()
    .at_least(1, "Search string is required")
    .at_most(32, "Search string is too long. Maximum length is 32");

pub const QUANTITY: IntRule = IntRule::unbounded()
    .whole("Invalid quantity of post cards")
    .at_least(1, "Invalid quantity of post cards")
    .at_most(100, "Maximum quantity of posts to load is 100");

pub const KEYWORD: TextRule =
    TextRule::unbounded().at_most(128, "Search query cannot be longer than 128 characters");

/// Check the writable fields of a post, tags included.
pub fn post_fields(title: &str, content: &str, tags: &[String]) -> Result<(), ValidationError> {
    TITLE.check(title)?;
    CONTENT.check(content)?;
    tags.iter().try_for_each(|t| TAG.check(t))
}

/// Drop repeated tag names, keeping the first occurrence of each.
pub fn dedup_tags(tags: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    tags.into_iter()
        .filter(|t| seen.insert(t.clone()))
        .collect()
}

/// A snippet query that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidSnippetQuery {
    pub limit: u64,
    pub tags: Vec<String>,
    pub keyword: String,
}

impl ValidSnippetQuery {
    /// Filter applied to the card query.
    ///
    /// A non-empty tag list switches filtering on, but the posts are matched
    /// against the keyword rather than the listed tags.
    // TODO: decide whether the filter should match the listed tags instead.
    pub fn tag_filter(&self) -> Option<&str> {
        (!self.tags.is_empty()).then_some(self.keyword.as_str())
    }
}

pub fn snippet_query(query: SnippetCriteria) -> Result<ValidSnippetQuery, ValidationError> {
    let quantity = QUANTITY.check_number(query.quantity)?;
    let keyword = query.keyword.unwrap_or_default();
    KEYWORD.check(&keyword)?;

    Ok(ValidSnippetQuery {
        limit: quantity.unsigned_abs(),
        tags: query.tags.unwrap_or_default(),
        keyword,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(quantity: f64) -> SnippetCriteria {
        SnippetCriteria {
            quantity,
            ..Default::default()
        }
    }

    #[test]
    fn title_bounds_report_their_own_message() {
        assert_eq!(
            TITLE.check("a").unwrap_err().message(),
            "Title must be at least 2 characters"
        );
        assert_eq!(
            TITLE.check(&"x".repeat(129)).unwrap_err().message(),
            "Title cannot exceed 128 characters"
        );
        assert!(TITLE.check(&"x".repeat(128)).is_ok());
    }

    #[test]
    fn lengths_count_characters() {
        assert!(TAG.check(&"ż".repeat(32)).is_ok());
        assert!(TAG.check(&"ż".repeat(33)).is_err());
    }

    #[test]
    fn post_fields_reports_first_violation() {
        let err = post_fields("a", "short", &[]).unwrap_err();
        assert_eq!(err.message(), "Title must be at least 2 characters");

        let err = post_fields("Valid title", "Lorem ipsum dolor amet", &[String::new()]).unwrap_err();
        assert_eq!(err.message(), "Tag name is required");
    }

    #[test]
    fn quantity_must_be_between_one_and_hundred() {
        assert_eq!(
            snippet_query(query(0.0)).unwrap_err().message(),
            "Invalid quantity of post cards"
        );
        assert_eq!(
            snippet_query(query(-3.0)).unwrap_err().message(),
            "Invalid quantity of post cards"
        );
        assert_eq!(
            snippet_query(query(101.0)).unwrap_err().message(),
            "Maximum quantity of posts to load is 100"
        );
        assert_eq!(snippet_query(query(100.0)).unwrap().limit, 100);
    }

    #[test]
    fn quantity_must_be_a_whole_number() {
        assert_eq!(snippet_query(query(10.0)).unwrap().limit, 10);
        assert_eq!(
            snippet_query(query(2.5)).unwrap_err().message(),
            "Invalid quantity of post cards"
        );
        assert_eq!(
            snippet_query(query(f64::NAN)).unwrap_err().message(),
            "Invalid quantity of post cards"
        );
        assert_eq!(
            snippet_query(query(1e300)).unwrap_err().message(),
            "Maximum quantity of posts to load is 100"
        );
    }

    #[test]
    fn keyword_defaults_to_empty_and_is_bounded() {
        let valid = snippet_query(query(5.0)).unwrap();
        assert_eq!(valid.keyword, "");

        let long = SnippetCriteria {
            quantity: 5.0,
            keyword: Some("k".repeat(129)),
            ..Default::default()
        };
        assert_eq!(
            snippet_query(long).unwrap_err().message(),
            "Search query cannot be longer than 128 characters"
        );
    }

    #[test]
    fn tag_filter_is_gated_by_tags_but_uses_keyword() {
        let without_tags = snippet_query(SnippetCriteria {
            quantity: 5.0,
            tags: Some(vec![]),
            keyword: Some("rust".to_owned()),
        })
        .unwrap();
        assert_eq!(without_tags.tag_filter(), None);

        let with_tags = snippet_query(SnippetCriteria {
            quantity: 5.0,
            tags: Some(vec!["typescript".to_owned()]),
            keyword: Some("rust".to_owned()),
        })
        .unwrap();
        assert_eq!(with_tags.tag_filter(), Some("rust"));
    }

    #[test]
    fn dedup_keeps_first_occurrence() {
        let tags = vec!["rust".to_owned(), "web".to_owned(), "rust".to_owned()];
        assert_eq!(dedup_tags(tags), vec!["rust".to_owned(), "web".to_owned()]);
    }
}
