//! Liveness endpoint.

use actix_web::HttpResponse;
use quill_shared::ApiResponse;

/// GET /api/ping
pub async fn ping() -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::ok_with_message(
        "Response from the api.",
        "Pong!",
    ))
}
