//! Liveness endpoint.

use actix_web::HttpResponse;

pub const LIVENESS_MESSAGE: &str = "Shoroter Rongdhonu Backend is running!";

/// GET /
pub async fn liveness() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(LIVENESS_MESSAGE)
}
