//! Liveness probe.

use actix_web::HttpResponse;

const POLO: &str = "polo";

/// `GET /marco`
pub async fn marco() -> HttpResponse {
    HttpResponse::Ok().body(POLO)
}
