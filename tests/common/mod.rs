#![allow(dead_code)]

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use timeflow::application::tracking::{
  CreateClientCommand, CreateClientUseCase, CreateProjectCommand, CreateProjectUseCase,
  CreateTodoCommand, CreateTodoUseCase, LogTimeEntryCommand, LogTimeEntryUseCase,
};
use timeflow::domain::invoice::{InvoiceService, InvoiceServiceDependencies, InvoiceSettings};
use timeflow::domain::reporting::ReportingService;
use timeflow::domain::tracking::{
  Client, CurrencyCode, Project, TimeEntry, TimeEntryRepository, Todo, TrackingService,
};
use timeflow::infrastructure::persistence::{InMemoryStore, Repositories};

/// Services wired over a fresh in-memory store.
pub struct TestContext {
  pub store: Arc<InMemoryStore>,
  pub repos: Repositories,
  pub tracking: Arc<TrackingService>,
  pub invoices: Arc<InvoiceService>,
  pub reporting: Arc<ReportingService>,
}

impl TestContext {
  pub fn new() -> Self {
    let store = Arc::new(InMemoryStore::new());
    let repos = Repositories::in_memory(store.clone());

    let tracking = Arc::new(TrackingService::new(
      repos.clients.clone(),
      repos.projects.clone(),
      repos.todos.clone(),
      repos.time_entries.clone(),
    ));
    let invoices = Arc::new(InvoiceService::new(
      InvoiceServiceDependencies {
        client_repo: repos.clients.clone(),
        project_repo: repos.projects.clone(),
        todo_repo: repos.todos.clone(),
        time_entry_repo: repos.time_entries.clone(),
        invoice_repo: repos.invoices.clone(),
        counter_repo: repos.counters.clone(),
      },
      InvoiceSettings::default(),
    ));
    let reporting = Arc::new(ReportingService::new(
      repos.clients.clone(),
      repos.projects.clone(),
      repos.todos.clone(),
      repos.time_entries.clone(),
    ));

    Self {
      store,
      repos,
      tracking,
      invoices,
      reporting,
    }
  }

  pub async fn client(&self, name: &str, rate: Decimal) -> Client {
    self.client_in(name, rate, "USD").await
  }

  pub async fn client_in(&self, name: &str, rate: Decimal, currency: &str) -> Client {
    CreateClientUseCase::new(self.tracking.clone(), CurrencyCode::usd())
      .execute(CreateClientCommand {
        id: None,
        name: name.to_string(),
        address: None,
        email: None,
        currency: Some(currency.to_string()),
        default_rate: Some(rate),
        terms: None,
        payoneer: None,
        bank: None,
      })
      .await
      .expect("client")
  }

  pub async fn project(
    &self,
    client_id: Uuid,
    name: &str,
    rate_override: Option<Decimal>,
  ) -> Project {
    CreateProjectUseCase::new(self.tracking.clone())
      .execute(CreateProjectCommand {
        id: None,
        client_id,
        name: name.to_string(),
        rate_override,
        status: None,
      })
      .await
      .expect("project")
  }

  pub async fn todo(&self, project_id: Uuid, title: &str) -> Todo {
    CreateTodoUseCase::new(self.tracking.clone())
      .execute(CreateTodoCommand {
        id: None,
        project_id,
        title: title.to_string(),
        estimate_minutes: None,
        status: None,
      })
      .await
      .expect("todo")
  }

  /// Logs a billable entry starting at `start` that lasts `seconds`.
  pub async fn entry(
    &self,
    project: &Project,
    todo: Option<&Todo>,
    start: &str,
    seconds: i64,
    note: &str,
  ) -> TimeEntry {
    self.entry_with(project, todo, start, seconds, note, true).await
  }

  pub async fn entry_with(
    &self,
    project: &Project,
    todo: Option<&Todo>,
    start: &str,
    seconds: i64,
    note: &str,
    billable: bool,
  ) -> TimeEntry {
    let start_at = at(start);
    LogTimeEntryUseCase::new(self.tracking.clone())
      .execute(LogTimeEntryCommand {
        id: None,
        todo_id: todo.map(|t| t.id),
        client_id: project.client_id,
        project_id: project.id,
        start_at,
        end_at: start_at + Duration::seconds(seconds),
        duration_seconds: seconds,
        note: Some(note.to_string()),
        billable: Some(billable),
      })
      .await
      .expect("time entry")
  }

  pub async fn stored_entry(&self, id: Uuid) -> TimeEntry {
    self
      .repos
      .time_entries
      .find_by_id(id)
      .await
      .expect("lookup")
      .expect("entry exists")
  }
}

pub fn at(value: &str) -> DateTime<Utc> {
  DateTime::parse_from_rfc3339(value)
    .expect("rfc3339 timestamp")
    .with_timezone(&Utc)
}
