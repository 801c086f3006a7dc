use actix_web::{App, HttpServer, middleware::Logger};
use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use timeflow::{
  adapters::http::{ApiRouteDependencies, RequestIdMiddleware, configure_api_routes},
  domain::invoice::{InvoiceService, InvoiceServiceDependencies},
  domain::reporting::ReportingService,
  domain::tracking::{CurrencyCode, TrackingService},
  infrastructure::{
    config::{Config, DatabaseConfig},
    persistence::{InMemoryStore, Repositories},
  },
};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  // Initialize environment variables from .env file
  dotenvy::dotenv().ok();

  // Initialize tracing subscriber for logging
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "timeflow=debug,actix_web=info".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  tracing::info!("Starting timeflow");

  let config = Config::load().context("Failed to load configuration")?;
  tracing::info!("Configuration loaded successfully");

  let repos = if config.database.is_memory() {
    tracing::warn!("Using the in-memory store; data is lost on shutdown");
    Repositories::in_memory(Arc::new(InMemoryStore::new()))
  } else {
    Repositories::postgres(connect_database(&config.database).await?)
  };

  // Initialize domain services
  let tracking_service = Arc::new(TrackingService::new(
    repos.clients.clone(),
    repos.projects.clone(),
    repos.todos.clone(),
    repos.time_entries.clone(),
  ));
  let invoice_service = Arc::new(InvoiceService::new(
    InvoiceServiceDependencies {
      client_repo: repos.clients.clone(),
      project_repo: repos.projects.clone(),
      todo_repo: repos.todos.clone(),
      time_entry_repo: repos.time_entries.clone(),
      invoice_repo: repos.invoices.clone(),
      counter_repo: repos.counters.clone(),
    },
    config.billing.invoice_settings(),
  ));
  let reporting_service = Arc::new(ReportingService::new(
    repos.clients.clone(),
    repos.projects.clone(),
    repos.todos.clone(),
    repos.time_entries.clone(),
  ));

  let default_currency = CurrencyCode::new(&config.billing.default_currency)
    .context("Invalid billing.default_currency")?;
  let deps = ApiRouteDependencies::new(
    tracking_service,
    invoice_service,
    reporting_service,
    default_currency,
    config.billing.recent_entries_limit,
  );

  let server_host = config.server.host.clone();
  let server_port = config.server.port;

  tracing::info!("Starting HTTP server on {}:{}", server_host, server_port);

  HttpServer::new(move || {
    let deps = deps.clone();
    App::new()
      .wrap(RequestIdMiddleware::new())
      .wrap(Logger::default())
      .configure(move |cfg| configure_api_routes(cfg, deps))
  })
  .bind((server_host.as_str(), server_port))
  .with_context(|| format!("Failed to bind {}:{}", server_host, server_port))?
  .run()
  .await
  .context("HTTP server failed")
}

async fn connect_database(database: &DatabaseConfig) -> anyhow::Result<sqlx::PgPool> {
  tracing::info!("Connecting to database");

  let pool = tokio::time::timeout(
    Duration::from_secs(database.connect_timeout_seconds),
    PgPoolOptions::new()
      .max_connections(database.max_connections)
      .acquire_timeout(Duration::from_secs(database.acquire_timeout_seconds))
      .connect(&database.url),
  )
  .await
  .map_err(|_| {
    tracing::error!(
      "Database connection timed out after {} seconds. Is PostgreSQL running?",
      database.connect_timeout_seconds
    );
    anyhow::anyhow!(
      "Database connection timed out after {} seconds",
      database.connect_timeout_seconds
    )
  })?
  .context("Failed to connect to database")?;

  tracing::info!("Database connection pool created");

  tracing::info!("Running database migrations");
  sqlx::migrate!("./migrations")
    .run(&pool)
    .await
    .context("Failed to run database migrations")?;
  tracing::info!("Database migrations completed");

  Ok(pool)
}
