//! Post and tag management handlers.

use actix_web::{HttpResponse, web};

use quill_core::domain::{NewPost, PostPatch};
use quill_shared::dto::{EditPostRequest, InsertPostRequest};
use quill_shared::{ApiResponse, PostPayload, TagPayload};

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/insertPost
pub async fn insert_post(
    state: web::Data<AppState>,
    body: web::Json<InsertPostRequest>,
) -> AppResult<HttpResponse> {
    let body = body.into_inner();
    let new_post = NewPost {
        title: body.title,
        content: body.content,
        published: body.published.unwrap_or(false),
        tags: body.tags.unwrap_or_default(),
    };

    let post = state.posts.insert_post(new_post).await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(
        PostPayload { post },
        "Post created successfully",
    )))
}

/// POST /api/editPost/{post_id}
pub async fn edit_post(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<EditPostRequest>,
) -> AppResult<HttpResponse> {
    let body = body.into_inner();
    let patch = PostPatch {
        title: body.title,
        content: body.content,
        published: body.published,
        tags: body.tags,
    };

    let post = state.posts.edit_post(path.into_inner(), patch).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        PostPayload { post },
        "Post updated",
    )))
}

/// POST /api/publishPost/{post_id}
pub async fn publish_post(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let post = state.posts.publish_post(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        PostPayload { post },
        "Post published",
    )))
}

/// GET /api/getPostById/{post_id}
pub async fn get_post_by_id(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let post = state.posts.get_post_by_id(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(PostPayload { post })))
}

/// POST /api/insertTag/{tag_name}
pub async fn insert_tag(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let tag = state.posts.insert_tag(&path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        TagPayload { tag },
        "Tag created",
    )))
}
