use actix_web::{HttpResponse, web};
use std::sync::Arc;
use validator::Validate;

use crate::{
  adapters::http::{dtos::SummaryRangeRequest, errors::ApiError},
  application::reporting::{
    GetUninvoicedAmountUseCase, SummarizeRangeCommand, SummarizeRangeUseCase,
  },
};

/// Tracked and billable seconds per client in a date range
/// POST /api/v1/metrics/summary-range
/// Body: { "start": "2025-01-01", "end": "2025-01-31" }
pub async fn summary_range_handler(
  request: web::Json<SummaryRangeRequest>,
  use_case: web::Data<Arc<SummarizeRangeUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let request = request.into_inner();
  let summary = use_case
    .execute(SummarizeRangeCommand {
      start: request.start,
      end: request.end,
    })
    .await?;
  Ok(HttpResponse::Ok().json(summary))
}

/// Value of billable work not yet invoiced
/// GET /api/v1/metrics/uninvoiced-amount
pub async fn uninvoiced_amount_handler(
  use_case: web::Data<Arc<GetUninvoicedAmountUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let response = use_case.execute().await?;
  Ok(HttpResponse::Ok().json(response))
}
