use actix_web::{HttpResponse, web};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::{
  adapters::http::{
    dtos::{ChangeInvoiceStatusRequest, PreviewInvoiceRequest},
    errors::ApiError,
  },
  application::invoice::{
    ChangeInvoiceStatusCommand, ChangeInvoiceStatusUseCase, CreateInvoiceCommand,
    CreateInvoiceUseCase, DeleteInvoiceCommand, DeleteInvoiceUseCase, GetInvoiceDetailsCommand,
    GetInvoiceDetailsUseCase, ListInvoicesUseCase, NextInvoiceNumberUseCase,
    PreviewInvoiceCommand, PreviewInvoiceUseCase, RevisePreviewCommand, RevisePreviewUseCase,
  },
};

/// List invoices, newest first
/// GET /api/v1/invoices
pub async fn list_invoices_handler(
  use_case: web::Data<Arc<ListInvoicesUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let response = use_case.execute().await?;
  Ok(HttpResponse::Ok().json(response))
}

/// Invoice with its lines in stored order
/// GET /api/v1/invoices/{id}
pub async fn get_invoice_handler(
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<GetInvoiceDetailsUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let response = use_case
    .execute(GetInvoiceDetailsCommand {
      invoice_id: path.into_inner(),
    })
    .await?;
  Ok(HttpResponse::Ok().json(response))
}

/// Commit a (possibly revised) preview as an invoice
/// POST /api/v1/invoices
/// Body: { "clientId", "number", "issueDate"?, "dueDate"?, "currency"?, "status"?, "totals", "lines" }
pub async fn create_invoice_handler(
  request: web::Json<CreateInvoiceCommand>,
  use_case: web::Data<Arc<CreateInvoiceUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let invoice = use_case.execute(request.into_inner()).await?;
  Ok(HttpResponse::Created().json(invoice))
}

/// Price the client's un-invoiced entries in a date range without persisting anything
/// POST /api/v1/invoices/preview
/// Body: { "clientId": "...", "start": "2025-01-01", "end": "2025-01-31", "projectId"? }
pub async fn preview_invoice_handler(
  request: web::Json<PreviewInvoiceRequest>,
  use_case: web::Data<Arc<PreviewInvoiceUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let request = request.into_inner();
  let preview = use_case
    .execute(PreviewInvoiceCommand {
      client_id: request.client_id,
      start: request.start,
      end: request.end,
      project_id: request.project_id,
    })
    .await?;
  Ok(HttpResponse::Ok().json(preview))
}

/// Apply edits to a preview
/// POST /api/v1/invoices/preview/revise
/// Body: { "draft": {...}, "edits": [{ "op": "setRate", "index": 0, "rate": "80" }] }
pub async fn revise_preview_handler(
  request: web::Json<RevisePreviewCommand>,
  use_case: web::Data<Arc<RevisePreviewUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let draft = use_case.execute(request.into_inner())?;
  Ok(HttpResponse::Ok().json(draft))
}

/// Change an invoice's status label
/// PATCH /api/v1/invoices/{id}/status
/// Body: { "status": "sent" }
pub async fn change_invoice_status_handler(
  path: web::Path<Uuid>,
  request: web::Json<ChangeInvoiceStatusRequest>,
  use_case: web::Data<Arc<ChangeInvoiceStatusUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let response = use_case
    .execute(ChangeInvoiceStatusCommand {
      invoice_id: path.into_inner(),
      new_status: request.into_inner().status,
    })
    .await?;
  Ok(HttpResponse::Ok().json(response))
}

/// Delete an invoice and release its time entries
/// DELETE /api/v1/invoices/{id}
pub async fn delete_invoice_handler(
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<DeleteInvoiceUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let response = use_case
    .execute(DeleteInvoiceCommand {
      invoice_id: path.into_inner(),
    })
    .await?;
  Ok(HttpResponse::Ok().json(response))
}

/// Reserve the next invoice number
/// GET /api/v1/counters/next-invoice
pub async fn next_invoice_number_handler(
  use_case: web::Data<Arc<NextInvoiceNumberUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let response = use_case.execute().await?;
  Ok(HttpResponse::Ok().json(response))
}
