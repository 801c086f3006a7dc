use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use super::entities::{ClientSummary, RangeSummary, SummaryTotals};
use super::errors::ReportingError;
use crate::domain::invoice::pricing::{
  effective_rate, format_hours_minutes, line_amount, normalize_seconds, raw_amount, round_money,
};
use crate::domain::tracking::entities::{Client, DateRange, Project, Todo};
use crate::domain::tracking::ports::{
  ClientRepository, ProjectRepository, TimeEntryRepository, TodoRepository,
};
use crate::domain::tracking::value_objects::{CurrencyCode, ValueObjectError};

const CSV_HEADER: [&str; 8] = [
  "Date",
  "Client",
  "Project>To-do",
  "Begin",
  "End",
  "Duration",
  "Hourly rate",
  "Logged amount",
];

pub struct ReportingService {
  client_repo: Arc<dyn ClientRepository>,
  project_repo: Arc<dyn ProjectRepository>,
  todo_repo: Arc<dyn TodoRepository>,
  time_entry_repo: Arc<dyn TimeEntryRepository>,
}

impl ReportingService {
  pub fn new(
    client_repo: Arc<dyn ClientRepository>,
    project_repo: Arc<dyn ProjectRepository>,
    todo_repo: Arc<dyn TodoRepository>,
    time_entry_repo: Arc<dyn TimeEntryRepository>,
  ) -> Self {
    Self {
      client_repo,
      project_repo,
      todo_repo,
      time_entry_repo,
    }
  }

  /// Raw (not normalized) seconds inside the range. Every client is listed, including those
  /// without entries, ordered by total descending then name.
  pub async fn summary_range(&self, range: DateRange) -> Result<RangeSummary, ReportingError> {
    let entries = self.time_entry_repo.find_in_range(range).await?;
    let clients = self.client_repo.find_all().await?;

    let mut totals = SummaryTotals::default();
    let mut per_client: HashMap<Uuid, SummaryTotals> = HashMap::new();
    for entry in &entries {
      totals.add(entry.duration_seconds, entry.billable);
      per_client
        .entry(entry.client_id)
        .or_default()
        .add(entry.duration_seconds, entry.billable);
    }

    let mut by_client: Vec<ClientSummary> = clients
      .into_iter()
      .map(|client| {
        let sums = per_client.remove(&client.id).unwrap_or_default();
        ClientSummary {
          client_id: client.id,
          client_name: client.name.into(),
          total_seconds: sums.total_seconds,
          billable_seconds: sums.billable_seconds,
        }
      })
      .collect();
    by_client.sort_by(|a, b| {
      b.total_seconds
        .cmp(&a.total_seconds)
        .then_with(|| a.client_name.cmp(&b.client_name))
    });

    Ok(RangeSummary { totals, by_client })
  }

  /// Outstanding billable value. Unlike invoice lines, the sum is rounded once at the end.
  pub async fn uninvoiced_amount(&self) -> Result<Decimal, ReportingError> {
    let entries = self.time_entry_repo.find_uninvoiced_billable().await?;
    if entries.is_empty() {
      return Ok(round_money(Decimal::ZERO));
    }
    let clients = self.clients_by_id().await?;
    let projects = self.projects_by_id().await?;

    let total = entries.iter().try_fold(Decimal::ZERO, |total, entry| {
      let rate = effective_rate(
        projects.get(&entry.project_id),
        clients.get(&entry.client_id),
      );
      let amount = raw_amount(normalize_seconds(entry.duration_seconds), rate)?;
      total.checked_add(amount).ok_or_else(|| {
        ValueObjectError::AmountOutOfRange("Uninvoiced total does not fit".to_string())
      })
    })?;

    Ok(round_money(total))
  }

  /// CSV of the most recent entries with their logged value, newest first.
  pub async fn export_time_entries_csv(&self, limit: u32) -> Result<Vec<u8>, ReportingError> {
    let entries = self.time_entry_repo.find_recent(limit).await?;
    let clients = self.clients_by_id().await?;
    let projects = self.projects_by_id().await?;
    let todos: HashMap<Uuid, Todo> = self
      .todo_repo
      .find_all()
      .await?
      .into_iter()
      .map(|t| (t.id, t))
      .collect();

    let mut writer = csv::WriterBuilder::new()
      .quote_style(csv::QuoteStyle::Always)
      .from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;

    for entry in &entries {
      let client = clients.get(&entry.client_id);
      let project = projects.get(&entry.project_id);
      let todo = entry.todo_id.and_then(|id| todos.get(&id));
      let rate = effective_rate(project, client);
      let amount = line_amount(normalize_seconds(entry.duration_seconds), rate)?;
      let currency = client.map(|c| c.currency.clone()).unwrap_or_default();

      let mut work = project.map(|p| p.name.value().to_string()).unwrap_or_default();
      if let Some(todo) = todo {
        work.push_str(" > ");
        work.push_str(todo.title.value());
      }

      writer.write_record([
        entry.start_date().to_string(),
        client.map(|c| c.name.value().to_string()).unwrap_or_default(),
        work,
        entry.start_clock(),
        entry.end_clock(),
        format_hours_minutes(normalize_seconds(entry.duration_seconds)),
        format_money(rate, &currency),
        format_money(amount, &currency),
      ])?;
    }

    writer
      .into_inner()
      .map_err(|e| ReportingError::Export(e.to_string()))
  }

  async fn clients_by_id(&self) -> Result<HashMap<Uuid, Client>, ReportingError> {
    let clients = self.client_repo.find_all().await?;
    Ok(clients.into_iter().map(|c| (c.id, c)).collect())
  }

  async fn projects_by_id(&self) -> Result<HashMap<Uuid, Project>, ReportingError> {
    let projects = self.project_repo.find_all().await?;
    Ok(projects.into_iter().map(|p| (p.id, p)).collect())
  }
}

fn format_money(amount: Decimal, currency: &CurrencyCode) -> String {
  format!("{} {:.2}", currency, round_money(amount))
}
