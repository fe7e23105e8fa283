//! Search service - tag suggestions and post card search.

use std::sync::Arc;

use super::store_failure;
use crate::domain::{SearchResult, SnippetCriteria, Tag};
use crate::error::DomainError;
use crate::ports::{PostRepository, TagRepository};
use crate::validation;

/// Read-only search over the tag and post stores.
pub struct SearchService {
    tags: Arc<dyn TagRepository>,
    posts: Arc<dyn PostRepository>,
}

impl SearchService {
    pub fn new(tags: Arc<dyn TagRepository>, posts: Arc<dyn PostRepository>) -> Self {
        Self { tags, posts }
    }

    /// Tags containing `search_string`, ignoring case.
    pub async fn search_tags(&self, search_string: &str) -> Result<Vec<Tag>, DomainError> {
        validation::SEARCH_STRING.check(search_string)?;

        self.tags
            .find_containing(search_string)
            .await
            .map_err(store_failure("search_tags"))
    }

    /// Published post cards plus tag suggestions for the keyword.
    ///
    /// A failing suggestion lookup degrades to an empty tag list; a failing
    /// card query fails the whole search.
    pub async fn get_post_snippets(
        &self,
        query: SnippetCriteria,
    ) -> Result<SearchResult, DomainError> {
        let query = validation::snippet_query(query).inspect_err(|e| {
            tracing::debug!(reason = %e, "Rejected snippet query");
        })?;

        let post_tags = self.suggest_tags(&query.keyword).await;

        let post_cards = self
            .posts
            .find_published_cards(query.tag_filter(), query.limit)
            .await
            .map_err(store_failure("get_post_snippets"))?;

        tracing::debug!(
            keyword = %query.keyword,
            cards = post_cards.len(),
            tags = post_tags.len(),
            "Snippet search complete"
        );

        Ok(SearchResult {
            post_cards,
            post_tags,
        })
    }

    // The keyword is already bounded by the snippet rules, and the empty
    // keyword must suggest every tag, so the search-string rule is skipped.
    async fn suggest_tags(&self, keyword: &str) -> Vec<Tag> {
        match self.tags.find_containing(keyword).await {
            Ok(tags) => tags,
            Err(e) => {
                tracing::warn!(error = %e, "Tag suggestions unavailable");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{StubStore, card, tag};

    fn service(store: &Arc<StubStore>) -> SearchService {
        SearchService::new(store.clone(), store.clone())
    }

    fn query(quantity: f64, tags: Option<Vec<&str>>, keyword: Option<&str>) -> SnippetCriteria {
        SnippetCriteria {
            quantity,
            tags: tags.map(|t| t.into_iter().map(str::to_owned).collect()),
            keyword: keyword.map(str::to_owned),
        }
    }

    fn seeded() -> StubStore {
        StubStore::new(
            vec![tag(1, "typescript"), tag(2, "rust"), tag(3, "assembly")],
            vec![
                card(1, "Published post assembly", &["assembly"]),
                card(2, "Assembly is great", &["assembly"]),
                card(3, "Typescript Types", &["typescript"]),
            ],
        )
    }

    #[tokio::test]
    async fn valid_query_returns_cards_and_tags() {
        let store = Arc::new(seeded());
        let result = service(&store)
            .get_post_snippets(query(10.0, None, Some("assembly")))
            .await
            .unwrap();

        assert_eq!(result.post_cards.len(), 3);
        assert_eq!(result.post_tags.len(), 1);
        assert_eq!(result.post_tags[0].tag, "assembly");
    }

    #[tokio::test]
    async fn invalid_quantity_never_touches_the_store() {
        let store = Arc::new(seeded());
        let svc = service(&store);

        for quantity in [0.0, 2.5, 101.0] {
            let err = svc
                .get_post_snippets(query(quantity, None, None))
                .await
                .unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)));
            assert!(err.to_string().contains("quantity"));
        }
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn empty_keyword_suggests_every_tag() {
        let store = Arc::new(seeded());
        let result = service(&store)
            .get_post_snippets(query(10.0, None, None))
            .await
            .unwrap();

        assert_eq!(result.post_tags.len(), 3);
        assert_eq!(store.last_card_filter(), Some(None));
    }

    #[tokio::test]
    async fn empty_tag_list_applies_no_filter() {
        let store = Arc::new(seeded());
        service(&store)
            .get_post_snippets(query(10.0, Some(vec![]), Some("rust")))
            .await
            .unwrap();

        assert_eq!(store.last_card_filter(), Some(None));
    }

    #[tokio::test]
    async fn tag_list_filters_cards_by_keyword() {
        let store = Arc::new(seeded());
        let result = service(&store)
            .get_post_snippets(query(10.0, Some(vec!["typescript"]), Some("ASSEMBLY")))
            .await
            .unwrap();

        assert_eq!(store.last_card_filter(), Some(Some("ASSEMBLY".to_owned())));
        assert_eq!(result.post_cards.len(), 2);
    }

    #[tokio::test]
    async fn quantity_caps_returned_cards() {
        let store = Arc::new(seeded());
        let result = service(&store)
            .get_post_snippets(query(2.0, None, None))
            .await
            .unwrap();

        assert_eq!(result.post_cards.len(), 2);
    }

    #[tokio::test]
    async fn card_failure_fails_the_search() {
        let store = Arc::new(seeded().failing_cards());
        let err = service(&store)
            .get_post_snippets(query(10.0, None, Some("rust")))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Internal("get_post_snippets")));
    }

    #[tokio::test]
    async fn tag_failure_degrades_to_empty_suggestions() {
        let store = Arc::new(seeded().failing_tags());
        let result = service(&store)
            .get_post_snippets(query(10.0, None, Some("rust")))
            .await
            .unwrap();

        assert_eq!(result.post_cards.len(), 3);
        assert!(result.post_tags.is_empty());
    }

    #[tokio::test]
    async fn search_tags_enforces_length_bounds() {
        let store = Arc::new(seeded());
        let svc = service(&store);

        let err = svc.search_tags("").await.unwrap_err();
        assert_eq!(err.to_string(), "Search string is required");

        let err = svc.search_tags(&"r".repeat(33)).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Search string is too long. Maximum length is 32"
        );
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn search_tags_is_case_insensitive_and_repeatable() {
        let store = Arc::new(seeded());
        let svc = service(&store);

        let first = svc.search_tags("RU").await.unwrap();
        let second = svc.search_tags("RU").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].tag, "rust");
    }

    #[tokio::test]
    async fn search_tags_store_failure_is_internal() {
        let store = Arc::new(seeded().failing_tags());
        let err = service(&store).search_tags("rust").await.unwrap_err();

        assert!(matches!(err, DomainError::Internal(_)));
        assert!(!err.to_string().contains("stub"));
    }
}
