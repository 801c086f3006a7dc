use actix_web::{HttpResponse, http::header, web};
use std::sync::Arc;
use validator::Validate;

use crate::{
  adapters::http::{
    dtos::{LimitQuery, MarkEntriesInvoicedRequest},
    errors::ApiError,
  },
  application::{
    invoice::{MarkEntriesInvoicedCommand, MarkEntriesInvoicedUseCase},
    reporting::{ExportTimeEntriesCommand, ExportTimeEntriesUseCase},
    tracking::{
      ListRecentEntriesCommand, ListRecentEntriesUseCase, LogTimeEntryCommand, LogTimeEntryUseCase,
    },
  },
};

/// Most recent time entries, newest first
/// GET /api/v1/time/recent?limit=50
pub async fn recent_entries_handler(
  query: web::Query<LimitQuery>,
  use_case: web::Data<Arc<ListRecentEntriesUseCase>>,
) -> Result<HttpResponse, ApiError> {
  query.validate()?;

  let entries = use_case
    .execute(ListRecentEntriesCommand { limit: query.limit })
    .await?;
  Ok(HttpResponse::Ok().json(entries))
}

/// Log a finished time entry
/// POST /api/v1/time
/// Body: { "clientId", "projectId", "todoId"?, "startAt", "endAt", "durationSeconds", "note"? }
pub async fn log_time_entry_handler(
  request: web::Json<LogTimeEntryCommand>,
  use_case: web::Data<Arc<LogTimeEntryUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let entry = use_case.execute(request.into_inner()).await?;
  Ok(HttpResponse::Created().json(entry))
}

/// Flag entries as invoiced without creating an invoice
/// POST /api/v1/time/mark-invoiced
/// Body: { "ids": ["...", "..."] }
pub async fn mark_entries_invoiced_handler(
  request: web::Json<MarkEntriesInvoicedRequest>,
  use_case: web::Data<Arc<MarkEntriesInvoicedUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let response = use_case
    .execute(MarkEntriesInvoicedCommand {
      ids: request.into_inner().ids,
    })
    .await?;
  Ok(HttpResponse::Ok().json(response))
}

/// CSV export of recent entries with their logged amounts
/// GET /api/v1/time/export?limit=200
pub async fn export_time_entries_handler(
  query: web::Query<LimitQuery>,
  use_case: web::Data<Arc<ExportTimeEntriesUseCase>>,
) -> Result<HttpResponse, ApiError> {
  query.validate()?;

  let csv = use_case
    .execute(ExportTimeEntriesCommand { limit: query.limit })
    .await?;
  Ok(
    HttpResponse::Ok()
      .content_type("text/csv; charset=utf-8")
      .insert_header((
        header::CONTENT_DISPOSITION,
        "attachment; filename=\"time-entries.csv\"",
      ))
      .body(csv),
  )
}
