use chrono::{Days, NaiveDate};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use uuid::Uuid;

use super::entities::{
  DraftEdit, DraftLine, Invoice, InvoiceDraft, InvoiceLine, InvoicePreview, InvoiceTotals,
};
use super::errors::InvoiceError;
use super::ports::{CounterRepository, InvoiceRepository};
use super::value_objects::{InvoiceNumber, InvoiceStatus};
use crate::domain::tracking::entities::{DateRange, Project, Todo};
use crate::domain::tracking::errors::RepositoryError;
use crate::domain::tracking::ports::{
  ClientRepository, ProjectRepository, TimeEntryRepository, TodoRepository,
};
use crate::domain::tracking::value_objects::{CurrencyCode, ValueObjectError};

const INVOICE_COUNTER: &str = "invoice";
const INVOICE_NUMBER_CONSTRAINT: &str = "invoices_number_key";

/// Invoice creation data. Totals and lines are stored as given.
pub struct InvoiceData {
  pub client_id: Uuid,
  pub number: InvoiceNumber,
  pub issue_date: NaiveDate,
  pub due_date: Option<NaiveDate>,
  pub currency: Option<CurrencyCode>,
  pub status: Option<InvoiceStatus>,
  pub totals: InvoiceTotals,
  pub lines: Vec<DraftLine>,
}

#[derive(Debug, Clone)]
pub struct InvoiceSettings {
  pub invoice_number_seed: i64,
  pub default_due_days: u64,
}

impl Default for InvoiceSettings {
  fn default() -> Self {
    Self {
      invoice_number_seed: 1001,
      default_due_days: 14,
    }
  }
}

pub struct InvoiceServiceDependencies {
  pub client_repo: Arc<dyn ClientRepository>,
  pub project_repo: Arc<dyn ProjectRepository>,
  pub todo_repo: Arc<dyn TodoRepository>,
  pub time_entry_repo: Arc<dyn TimeEntryRepository>,
  pub invoice_repo: Arc<dyn InvoiceRepository>,
  pub counter_repo: Arc<dyn CounterRepository>,
}

pub struct InvoiceService {
  client_repo: Arc<dyn ClientRepository>,
  project_repo: Arc<dyn ProjectRepository>,
  todo_repo: Arc<dyn TodoRepository>,
  time_entry_repo: Arc<dyn TimeEntryRepository>,
  invoice_repo: Arc<dyn InvoiceRepository>,
  counter_repo: Arc<dyn CounterRepository>,
  settings: InvoiceSettings,
}

impl InvoiceService {
  pub fn new(deps: InvoiceServiceDependencies, settings: InvoiceSettings) -> Self {
    Self {
      client_repo: deps.client_repo,
      project_repo: deps.project_repo,
      todo_repo: deps.todo_repo,
      time_entry_repo: deps.time_entry_repo,
      invoice_repo: deps.invoice_repo,
      counter_repo: deps.counter_repo,
      settings,
    }
  }

  // Preview operations

  /// Prices every un-invoiced entry of the client inside the range, oldest first. Read-only.
  pub async fn preview(
    &self,
    client_id: Uuid,
    range: DateRange,
    project_id: Option<Uuid>,
  ) -> Result<InvoicePreview, InvoiceError> {
    let client = self
      .client_repo
      .find_by_id(client_id)
      .await?
      .ok_or(InvoiceError::ClientNotFound(client_id))?;

    let entries = self
      .time_entry_repo
      .find_uninvoiced_for_client(client_id, range, project_id)
      .await?;

    let projects = self
      .load_projects(entries.iter().map(|e| e.project_id))
      .await?;
    let todos = self.load_todos(entries.iter().filter_map(|e| e.todo_id)).await?;

    let lines = entries
      .iter()
      .map(|entry| {
        let project = projects.get(&entry.project_id);
        let todo = entry.todo_id.and_then(|id| todos.get(&id));
        DraftLine::from_entry(entry, &client, project, todo)
      })
      .collect::<Result<Vec<DraftLine>, ValueObjectError>>()?;

    tracing::debug!(
      client_id = %client_id,
      lines = lines.len(),
      "Invoice preview built"
    );

    let draft = InvoiceDraft::new(lines, client.currency.clone());
    Ok(InvoicePreview { client, draft })
  }

  /// Applies edits in order; the first failing edit aborts the whole revision.
  pub fn revise(
    &self,
    mut draft: InvoiceDraft,
    edits: Vec<DraftEdit>,
  ) -> Result<InvoiceDraft, InvoiceError> {
    for edit in edits {
      draft.apply(edit)?;
    }
    draft.recompute_totals();
    Ok(draft)
  }

  // Invoice operations
  pub async fn next_invoice_number(&self) -> Result<InvoiceNumber, InvoiceError> {
    let value = self
      .counter_repo
      .next_value(INVOICE_COUNTER, self.settings.invoice_number_seed)
      .await?;
    Ok(InvoiceNumber::new(value)?)
  }

  /// Commits an invoice: invoice row, lines and the `invoiced` flag of every referenced entry
  /// persist together or not at all.
  pub async fn create_invoice(&self, data: InvoiceData) -> Result<Invoice, InvoiceError> {
    let client = self
      .client_repo
      .find_by_id(data.client_id)
      .await?
      .ok_or(InvoiceError::ClientNotFound(data.client_id))?;

    let mut seen = HashSet::new();
    for entry_id in data.lines.iter().filter_map(|line| line.entry_id) {
      if !seen.insert(entry_id) {
        return Err(InvoiceError::DuplicateTimeEntry(entry_id));
      }
    }

    let due_date = match data.due_date {
      Some(date) => date,
      None => self.default_due_date(data.issue_date)?,
    };

    let invoice = Invoice::new(
      client.id,
      data.number,
      data.issue_date,
      due_date,
      data.currency.unwrap_or(client.currency),
      data.status.unwrap_or_default(),
      &data.totals,
    );
    let lines = data
      .lines
      .iter()
      .map(|line| InvoiceLine::from_draft(invoice.id, line))
      .collect();

    let number = invoice.number;
    let invoice = self
      .invoice_repo
      .create_with_lines(invoice, lines)
      .await
      .map_err(|e| match e {
        RepositoryError::Conflict(reason) => {
          tracing::warn!(invoice_number = %number, reason = %reason, "Invoice commit rejected");
          InvoiceError::TimeEntriesUnavailable
        }
        RepositoryError::DuplicateKey(constraint) if constraint == INVOICE_NUMBER_CONSTRAINT => {
          InvoiceError::InvoiceNumberAlreadyExists(number.value())
        }
        other => InvoiceError::Repository(other),
      })?;

    tracing::info!(
      invoice_id = %invoice.id,
      invoice_number = %invoice.number,
      entries = seen.len(),
      "Invoice created"
    );
    Ok(invoice)
  }

  pub async fn get_invoice(
    &self,
    id: Uuid,
  ) -> Result<(Invoice, Vec<InvoiceLine>), InvoiceError> {
    let invoice = self
      .invoice_repo
      .find_by_id(id)
      .await?
      .ok_or(InvoiceError::InvoiceNotFound(id))?;
    let lines = self.invoice_repo.find_lines(id).await?;
    Ok((invoice, lines))
  }

  pub async fn list_invoices(&self) -> Result<Vec<Invoice>, InvoiceError> {
    Ok(self.invoice_repo.find_all().await?)
  }

  pub async fn set_status(&self, id: Uuid, status: InvoiceStatus) -> Result<(), InvoiceError> {
    if !self.invoice_repo.update_status(id, &status).await? {
      return Err(InvoiceError::InvoiceNotFound(id));
    }
    tracing::info!(invoice_id = %id, status = %status, "Invoice status changed");
    Ok(())
  }

  /// Deletes the invoice and its lines and releases the referenced time entries.
  /// Returns the released entry ids.
  pub async fn delete_invoice(&self, id: Uuid) -> Result<Vec<Uuid>, InvoiceError> {
    let released = self
      .invoice_repo
      .delete_with_lines(id)
      .await?
      .ok_or(InvoiceError::InvoiceNotFound(id))?;
    tracing::info!(invoice_id = %id, released = released.len(), "Invoice deleted");
    Ok(released)
  }

  /// Out-of-band correction: flags entries as invoiced without an invoice. Unknown ids are
  /// skipped; returns how many rows changed.
  pub async fn mark_entries_invoiced(&self, ids: &[Uuid]) -> Result<u64, InvoiceError> {
    let updated = self.time_entry_repo.mark_invoiced(ids).await?;
    tracing::info!(requested = ids.len(), updated, "Time entries marked invoiced");
    Ok(updated)
  }

  fn default_due_date(&self, issue_date: NaiveDate) -> Result<NaiveDate, InvoiceError> {
    issue_date
      .checked_add_days(Days::new(self.settings.default_due_days))
      .ok_or_else(|| {
        InvoiceError::Validation(ValueObjectError::InvalidDate(format!(
          "Due date out of range for issue date {}",
          issue_date
        )))
      })
  }

  async fn load_projects(
    &self,
    ids: impl Iterator<Item = Uuid>,
  ) -> Result<HashMap<Uuid, Project>, InvoiceError> {
    let mut projects = HashMap::new();
    for id in ids.collect::<HashSet<_>>() {
      if let Some(project) = self.project_repo.find_by_id(id).await? {
        projects.insert(id, project);
      }
    }
    Ok(projects)
  }

  async fn load_todos(
    &self,
    ids: impl Iterator<Item = Uuid>,
  ) -> Result<HashMap<Uuid, Todo>, InvoiceError> {
    let ids: Vec<Uuid> = ids.collect::<HashSet<_>>().into_iter().collect();
    if ids.is_empty() {
      return Ok(HashMap::new());
    }
    let todos = self.todo_repo.find_by_ids(&ids).await?;
    Ok(todos.into_iter().map(|t| (t.id, t)).collect())
  }
}
