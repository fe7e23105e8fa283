//! Search handlers.

use actix_web::{HttpResponse, web};

use quill_core::domain::SnippetCriteria;
use quill_shared::ApiResponse;
use quill_shared::dto::{MultiSearchRequest, TagSearchRequest};

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/search/multiSearch - post cards plus tag suggestions for a search bar.
pub async fn multi_search(
    state: web::Data<AppState>,
    body: web::Json<MultiSearchRequest>,
) -> AppResult<HttpResponse> {
    let criteria = body.into_inner().criteria;
    let result = state
        .search
        .get_post_snippets(SnippetCriteria {
            quantity: criteria.quantity,
            tags: criteria.tags,
            keyword: criteria.keyword,
        })
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(result)))
}

/// GET /api/search/tags?searchString=...
pub async fn search_tags(
    state: web::Data<AppState>,
    query: web::Query<TagSearchRequest>,
) -> AppResult<HttpResponse> {
    let tags = state.search.search_tags(&query.search_string).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(tags)))
}
