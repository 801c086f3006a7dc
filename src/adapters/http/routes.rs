use actix_web::web;
use std::sync::Arc;

use crate::application::invoice::{
  ChangeInvoiceStatusUseCase, CreateInvoiceUseCase, DeleteInvoiceUseCase, GetInvoiceDetailsUseCase,
  ListInvoicesUseCase, MarkEntriesInvoicedUseCase, NextInvoiceNumberUseCase, PreviewInvoiceUseCase,
  RevisePreviewUseCase,
};
use crate::application::reporting::{
  ExportTimeEntriesUseCase, GetUninvoicedAmountUseCase, SummarizeRangeUseCase,
};
use crate::application::tracking::{
  CreateClientUseCase, CreateProjectUseCase, CreateTodoUseCase, ListCatalogUseCase,
  ListRecentEntriesUseCase, LogTimeEntryUseCase,
};
use crate::domain::invoice::InvoiceService;
use crate::domain::reporting::ReportingService;
use crate::domain::tracking::{CurrencyCode, TrackingService};

use super::errors::ApiError;
use super::handlers::catalog::{
  create_client_handler, create_project_handler, create_todo_handler, list_clients_handler,
  list_projects_handler, list_todos_handler,
};
use super::handlers::health_handler;
use super::handlers::invoices::{
  change_invoice_status_handler, create_invoice_handler, delete_invoice_handler,
  get_invoice_handler, list_invoices_handler, next_invoice_number_handler,
  preview_invoice_handler, revise_preview_handler,
};
use super::handlers::reports::{summary_range_handler, uninvoiced_amount_handler};
use super::handlers::time_entries::{
  export_time_entries_handler, log_time_entry_handler, mark_entries_invoiced_handler,
  recent_entries_handler,
};

/// Every use case the JSON API needs, cheap to clone into each worker.
#[derive(Clone)]
pub struct ApiRouteDependencies {
  // Catalog
  pub list_catalog_use_case: Arc<ListCatalogUseCase>,
  pub create_client_use_case: Arc<CreateClientUseCase>,
  pub create_project_use_case: Arc<CreateProjectUseCase>,
  pub create_todo_use_case: Arc<CreateTodoUseCase>,
  // Time entries
  pub log_time_entry_use_case: Arc<LogTimeEntryUseCase>,
  pub recent_entries_use_case: Arc<ListRecentEntriesUseCase>,
  pub mark_entries_invoiced_use_case: Arc<MarkEntriesInvoicedUseCase>,
  pub export_time_entries_use_case: Arc<ExportTimeEntriesUseCase>,
  // Invoices
  pub preview_invoice_use_case: Arc<PreviewInvoiceUseCase>,
  pub revise_preview_use_case: Arc<RevisePreviewUseCase>,
  pub create_invoice_use_case: Arc<CreateInvoiceUseCase>,
  pub list_invoices_use_case: Arc<ListInvoicesUseCase>,
  pub get_invoice_details_use_case: Arc<GetInvoiceDetailsUseCase>,
  pub change_invoice_status_use_case: Arc<ChangeInvoiceStatusUseCase>,
  pub delete_invoice_use_case: Arc<DeleteInvoiceUseCase>,
  pub next_invoice_number_use_case: Arc<NextInvoiceNumberUseCase>,
  // Metrics
  pub summarize_range_use_case: Arc<SummarizeRangeUseCase>,
  pub uninvoiced_amount_use_case: Arc<GetUninvoicedAmountUseCase>,
}

impl ApiRouteDependencies {
  /// Builds every use case on top of the three domain services.
  pub fn new(
    tracking_service: Arc<TrackingService>,
    invoice_service: Arc<InvoiceService>,
    reporting_service: Arc<ReportingService>,
    default_currency: CurrencyCode,
    recent_entries_limit: u32,
  ) -> Self {
    Self {
      list_catalog_use_case: Arc::new(ListCatalogUseCase::new(tracking_service.clone())),
      create_client_use_case: Arc::new(CreateClientUseCase::new(
        tracking_service.clone(),
        default_currency,
      )),
      create_project_use_case: Arc::new(CreateProjectUseCase::new(tracking_service.clone())),
      create_todo_use_case: Arc::new(CreateTodoUseCase::new(tracking_service.clone())),
      log_time_entry_use_case: Arc::new(LogTimeEntryUseCase::new(tracking_service.clone())),
      recent_entries_use_case: Arc::new(ListRecentEntriesUseCase::new(
        tracking_service,
        recent_entries_limit,
      )),
      mark_entries_invoiced_use_case: Arc::new(MarkEntriesInvoicedUseCase::new(
        invoice_service.clone(),
      )),
      export_time_entries_use_case: Arc::new(ExportTimeEntriesUseCase::new(
        reporting_service.clone(),
        recent_entries_limit,
      )),
      preview_invoice_use_case: Arc::new(PreviewInvoiceUseCase::new(invoice_service.clone())),
      revise_preview_use_case: Arc::new(RevisePreviewUseCase::new(invoice_service.clone())),
      create_invoice_use_case: Arc::new(CreateInvoiceUseCase::new(invoice_service.clone())),
      list_invoices_use_case: Arc::new(ListInvoicesUseCase::new(invoice_service.clone())),
      get_invoice_details_use_case: Arc::new(GetInvoiceDetailsUseCase::new(
        invoice_service.clone(),
      )),
      change_invoice_status_use_case: Arc::new(ChangeInvoiceStatusUseCase::new(
        invoice_service.clone(),
      )),
      delete_invoice_use_case: Arc::new(DeleteInvoiceUseCase::new(invoice_service.clone())),
      next_invoice_number_use_case: Arc::new(NextInvoiceNumberUseCase::new(invoice_service)),
      summarize_range_use_case: Arc::new(SummarizeRangeUseCase::new(reporting_service.clone())),
      uninvoiced_amount_use_case: Arc::new(GetUninvoicedAmountUseCase::new(reporting_service)),
    }
  }
}

/// Mounts the whole JSON API plus `/health`.
///
/// # Routes
///
/// - GET /health
/// - /api/v1/clients, /api/v1/projects, /api/v1/todos - catalog
/// - /api/v1/time - time entries
/// - /api/v1/invoices, /api/v1/counters - invoicing
/// - /api/v1/metrics - aggregates
pub fn configure_api_routes(cfg: &mut web::ServiceConfig, deps: ApiRouteDependencies) {
  cfg.route("/health", web::get().to(health_handler)).service(
    web::scope("/api/v1")
      .app_data(web::JsonConfig::default().error_handler(|err, _| {
        ApiError::Validation(format!("Invalid JSON body: {}", err)).into()
      }))
      .app_data(web::QueryConfig::default().error_handler(|err, _| {
        ApiError::Validation(format!("Invalid query string: {}", err)).into()
      }))
      .configure(|cfg| {
        configure_catalog_routes(
          cfg,
          deps.list_catalog_use_case.clone(),
          deps.create_client_use_case.clone(),
          deps.create_project_use_case.clone(),
          deps.create_todo_use_case.clone(),
        )
      })
      .service(web::scope("/time").configure(|cfg| {
        configure_time_entry_routes(
          cfg,
          deps.log_time_entry_use_case.clone(),
          deps.recent_entries_use_case.clone(),
          deps.mark_entries_invoiced_use_case.clone(),
          deps.export_time_entries_use_case.clone(),
        )
      }))
      .service(web::scope("/invoices").configure(|cfg| {
        configure_invoice_routes(
          cfg,
          InvoiceRouteUseCases {
            preview: deps.preview_invoice_use_case.clone(),
            revise: deps.revise_preview_use_case.clone(),
            create: deps.create_invoice_use_case.clone(),
            list: deps.list_invoices_use_case.clone(),
            details: deps.get_invoice_details_use_case.clone(),
            change_status: deps.change_invoice_status_use_case.clone(),
            delete: deps.delete_invoice_use_case.clone(),
          },
        )
      }))
      .service(
        web::scope("/counters")
          .app_data(web::Data::new(deps.next_invoice_number_use_case.clone()))
          .route("/next-invoice", web::get().to(next_invoice_number_handler)),
      )
      .service(web::scope("/metrics").configure(|cfg| {
        configure_metrics_routes(
          cfg,
          deps.summarize_range_use_case.clone(),
          deps.uninvoiced_amount_use_case.clone(),
        )
      })),
  );
}

/// Configure catalog routes
///
/// - GET|POST /clients
/// - GET|POST /projects
/// - GET|POST /todos
pub fn configure_catalog_routes(
  cfg: &mut web::ServiceConfig,
  list_use_case: Arc<ListCatalogUseCase>,
  create_client_use_case: Arc<CreateClientUseCase>,
  create_project_use_case: Arc<CreateProjectUseCase>,
  create_todo_use_case: Arc<CreateTodoUseCase>,
) {
  cfg
    .app_data(web::Data::new(list_use_case))
    .app_data(web::Data::new(create_client_use_case))
    .app_data(web::Data::new(create_project_use_case))
    .app_data(web::Data::new(create_todo_use_case))
    .route("/clients", web::get().to(list_clients_handler))
    .route("/clients", web::post().to(create_client_handler))
    .route("/projects", web::get().to(list_projects_handler))
    .route("/projects", web::post().to(create_project_handler))
    .route("/todos", web::get().to(list_todos_handler))
    .route("/todos", web::post().to(create_todo_handler));
}

/// Configure time entry routes
///
/// - POST /
/// - GET /recent?limit=
/// - POST /mark-invoiced
/// - GET /export?limit=
pub fn configure_time_entry_routes(
  cfg: &mut web::ServiceConfig,
  log_use_case: Arc<LogTimeEntryUseCase>,
  recent_use_case: Arc<ListRecentEntriesUseCase>,
  mark_invoiced_use_case: Arc<MarkEntriesInvoicedUseCase>,
  export_use_case: Arc<ExportTimeEntriesUseCase>,
) {
  cfg
    .app_data(web::Data::new(log_use_case))
    .app_data(web::Data::new(recent_use_case))
    .app_data(web::Data::new(mark_invoiced_use_case))
    .app_data(web::Data::new(export_use_case))
    .route("", web::post().to(log_time_entry_handler))
    .route("/recent", web::get().to(recent_entries_handler))
    .route("/mark-invoiced", web::post().to(mark_entries_invoiced_handler))
    .route("/export", web::get().to(export_time_entries_handler));
}

pub struct InvoiceRouteUseCases {
  pub preview: Arc<PreviewInvoiceUseCase>,
  pub revise: Arc<RevisePreviewUseCase>,
  pub create: Arc<CreateInvoiceUseCase>,
  pub list: Arc<ListInvoicesUseCase>,
  pub details: Arc<GetInvoiceDetailsUseCase>,
  pub change_status: Arc<ChangeInvoiceStatusUseCase>,
  pub delete: Arc<DeleteInvoiceUseCase>,
}

/// Configure invoice routes
///
/// - GET /
/// - POST /
/// - POST /preview
/// - POST /preview/revise
/// - GET /{id}
/// - PATCH /{id}/status
/// - DELETE /{id}
pub fn configure_invoice_routes(cfg: &mut web::ServiceConfig, use_cases: InvoiceRouteUseCases) {
  cfg
    .app_data(web::Data::new(use_cases.preview))
    .app_data(web::Data::new(use_cases.revise))
    .app_data(web::Data::new(use_cases.create))
    .app_data(web::Data::new(use_cases.list))
    .app_data(web::Data::new(use_cases.details))
    .app_data(web::Data::new(use_cases.change_status))
    .app_data(web::Data::new(use_cases.delete))
    .route("", web::get().to(list_invoices_handler))
    .route("", web::post().to(create_invoice_handler))
    .route("/preview", web::post().to(preview_invoice_handler))
    .route("/preview/revise", web::post().to(revise_preview_handler))
    .route("/{id}", web::get().to(get_invoice_handler))
    .route("/{id}", web::delete().to(delete_invoice_handler))
    .route(
      "/{id}/status",
      web::patch().to(change_invoice_status_handler),
    );
}

/// Configure metrics routes
///
/// - POST /summary-range
/// - GET /uninvoiced-amount
pub fn configure_metrics_routes(
  cfg: &mut web::ServiceConfig,
  summary_use_case: Arc<SummarizeRangeUseCase>,
  uninvoiced_use_case: Arc<GetUninvoicedAmountUseCase>,
) {
  cfg
    .app_data(web::Data::new(summary_use_case))
    .app_data(web::Data::new(uninvoiced_use_case))
    .route("/summary-range", web::post().to(summary_range_handler))
    .route("/uninvoiced-amount", web::get().to(uninvoiced_amount_handler));
}
