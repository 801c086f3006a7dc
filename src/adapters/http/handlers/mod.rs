pub mod catalog;
pub mod invoices;
pub mod reports;
pub mod time_entries;

use actix_web::HttpResponse;

use crate::adapters::http::dtos::HealthResponse;

/// Liveness probe
/// GET /health
pub async fn health_handler() -> HttpResponse {
  HttpResponse::Ok().json(HealthResponse { status: "ok" })
}
