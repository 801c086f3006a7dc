pub mod dtos;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod routes;

// Re-export commonly used types
pub use dtos::{ErrorResponse, HealthResponse};
pub use errors::ApiError;
pub use middleware::{RequestId, RequestIdExt, RequestIdMiddleware};
pub use routes::{
  ApiRouteDependencies, InvoiceRouteUseCases, configure_api_routes, configure_catalog_routes,
  configure_invoice_routes, configure_metrics_routes, configure_time_entry_routes,
};
