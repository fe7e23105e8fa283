//! HTTP handlers and route configuration.

mod ping;
mod posts;
mod search;


use actix_web::web;

use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Malformed input still gets an envelope
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                AppError::BadRequest(err.to_string()).into()
            }))
            .app_data(web::PathConfig::default().error_handler(|err, _req| {
                AppError::BadRequest(err.to_string()).into()
            }))
            .app_data(web::QueryConfig::default().error_handler(|err, _req| {
                AppError::BadRequest(err.to_string()).into()
            }))
            .route("/ping", web::get().to(ping::ping))
            // Posts and tags
            .route("/insertPost", web::post().to(posts::insert_post))
            .route("/editPost/{post_id}", web::post().to(posts::edit_post))
            .route("/publishPost/{post_id}", web::post().to(posts::publish_post))
            .route("/getPostById/{post_id}", web::get().to(posts::get_post_by_id))
            .route("/insertTag/{tag_name}", web::post().to(posts::insert_tag))
            // Search
            .service(
                web::scope("/search")
                    .route("/multiSearch", web::post().to(search::multi_search))
                    .route("/tags", web::get().to(search::search_tags)),
            ),
    );
}
