//! Process-local store implementing every repository port.
//!
//! All state sits behind one async mutex, so each port call observes and mutates a consistent
//! snapshot and multi-record writes (invoice commit, delete, bulk flagging) are all-or-nothing.
//! Used by the test suite and by the `database.url = "memory"` development mode.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::domain::invoice::entities::{Invoice, InvoiceLine};
use crate::domain::invoice::ports::{CounterRepository, InvoiceRepository};
use crate::domain::invoice::value_objects::InvoiceStatus;
use crate::domain::tracking::entities::{Client, DateRange, Project, TimeEntry, Todo};
use crate::domain::tracking::errors::RepositoryError;
use crate::domain::tracking::ports::{
  ClientRepository, ProjectRepository, TimeEntryRepository, TodoRepository,
};

#[derive(Default)]
struct MemoryState {
  clients: HashMap<Uuid, Client>,
  projects: HashMap<Uuid, Project>,
  todos: HashMap<Uuid, Todo>,
  time_entries: HashMap<Uuid, TimeEntry>,
  invoices: HashMap<Uuid, Invoice>,
  invoice_lines: Vec<InvoiceLine>,
  counters: HashMap<String, i64>,
}

#[derive(Default)]
pub struct InMemoryStore {
  state: Mutex<MemoryState>,
}

impl InMemoryStore {
  pub fn new() -> Self {
    Self::default()
  }
}

fn insert_unique<T>(
  map: &mut HashMap<Uuid, T>,
  id: Uuid,
  value: T,
  constraint: &str,
) -> Result<(), RepositoryError> {
  if map.contains_key(&id) {
    return Err(RepositoryError::DuplicateKey(constraint.to_string()));
  }
  map.insert(id, value);
  Ok(())
}

#[async_trait]
impl ClientRepository for InMemoryStore {
  async fn create(&self, client: Client) -> Result<Client, RepositoryError> {
    let mut state = self.state.lock().await;
    insert_unique(&mut state.clients, client.id, client.clone(), "clients_pkey")?;
    Ok(client)
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Client>, RepositoryError> {
    Ok(self.state.lock().await.clients.get(&id).cloned())
  }

  async fn find_all(&self) -> Result<Vec<Client>, RepositoryError> {
    let state = self.state.lock().await;
    let mut clients: Vec<Client> = state.clients.values().cloned().collect();
    clients.sort_by(|a, b| a.name.value().cmp(b.name.value()).then(a.id.cmp(&b.id)));
    Ok(clients)
  }
}

#[async_trait]
impl ProjectRepository for InMemoryStore {
  async fn create(&self, project: Project) -> Result<Project, RepositoryError> {
    let mut state = self.state.lock().await;
    insert_unique(&mut state.projects, project.id, project.clone(), "projects_pkey")?;
    Ok(project)
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Project>, RepositoryError> {
    Ok(self.state.lock().await.projects.get(&id).cloned())
  }

  async fn find_by_client_id(&self, client_id: Uuid) -> Result<Vec<Project>, RepositoryError> {
    let state = self.state.lock().await;
    let mut projects: Vec<Project> = state
      .projects
      .values()
      .filter(|p| p.client_id == client_id)
      .cloned()
      .collect();
    projects.sort_by(|a, b| a.name.value().cmp(b.name.value()).then(a.id.cmp(&b.id)));
    Ok(projects)
  }

  async fn find_all(&self) -> Result<Vec<Project>, RepositoryError> {
    let state = self.state.lock().await;
    let mut projects: Vec<Project> = state.projects.values().cloned().collect();
    projects.sort_by(|a, b| a.name.value().cmp(b.name.value()).then(a.id.cmp(&b.id)));
    Ok(projects)
  }
}

#[async_trait]
impl TodoRepository for InMemoryStore {
  async fn create(&self, todo: Todo) -> Result<Todo, RepositoryError> {
    let mut state = self.state.lock().await;
    insert_unique(&mut state.todos, todo.id, todo.clone(), "todos_pkey")?;
    Ok(todo)
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Todo>, RepositoryError> {
    Ok(self.state.lock().await.todos.get(&id).cloned())
  }

  async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Todo>, RepositoryError> {
    let state = self.state.lock().await;
    Ok(ids.iter().filter_map(|id| state.todos.get(id).cloned()).collect())
  }

  async fn find_all(&self) -> Result<Vec<Todo>, RepositoryError> {
    let state = self.state.lock().await;
    let mut todos: Vec<Todo> = state.todos.values().cloned().collect();
    todos.sort_by(|a, b| a.title.value().cmp(b.title.value()).then(a.id.cmp(&b.id)));
    Ok(todos)
  }
}

#[async_trait]
impl TimeEntryRepository for InMemoryStore {
  async fn create(&self, entry: TimeEntry) -> Result<TimeEntry, RepositoryError> {
    let mut state = self.state.lock().await;
    insert_unique(&mut state.time_entries, entry.id, entry.clone(), "time_entries_pkey")?;
    Ok(entry)
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<TimeEntry>, RepositoryError> {
    Ok(self.state.lock().await.time_entries.get(&id).cloned())
  }

  async fn find_uninvoiced_for_client(
    &self,
    client_id: Uuid,
    range: DateRange,
    project_id: Option<Uuid>,
  ) -> Result<Vec<TimeEntry>, RepositoryError> {
    let state = self.state.lock().await;
    let mut entries: Vec<TimeEntry> = state
      .time_entries
      .values()
      .filter(|e| e.client_id == client_id && !e.invoiced && e.falls_within(&range))
      .filter(|e| project_id.is_none_or(|id| e.project_id == id))
      .cloned()
      .collect();
    entries.sort_by(|a, b| a.start_at.cmp(&b.start_at).then(a.id.cmp(&b.id)));
    Ok(entries)
  }

  async fn find_in_range(&self, range: DateRange) -> Result<Vec<TimeEntry>, RepositoryError> {
    let state = self.state.lock().await;
    let mut entries: Vec<TimeEntry> = state
      .time_entries
      .values()
      .filter(|e| e.falls_within(&range))
      .cloned()
      .collect();
    entries.sort_by(|a, b| a.start_at.cmp(&b.start_at).then(a.id.cmp(&b.id)));
    Ok(entries)
  }

  async fn find_uninvoiced_billable(&self) -> Result<Vec<TimeEntry>, RepositoryError> {
    let state = self.state.lock().await;
    Ok(
      state
        .time_entries
        .values()
        .filter(|e| e.billable && !e.invoiced)
        .cloned()
        .collect(),
    )
  }

  async fn find_recent(&self, limit: u32) -> Result<Vec<TimeEntry>, RepositoryError> {
    let state = self.state.lock().await;
    let mut entries: Vec<TimeEntry> = state.time_entries.values().cloned().collect();
    entries.sort_by(|a, b| b.start_at.cmp(&a.start_at).then(b.id.cmp(&a.id)));
    entries.truncate(limit as usize);
    Ok(entries)
  }

  async fn mark_invoiced(&self, ids: &[Uuid]) -> Result<u64, RepositoryError> {
    let mut state = self.state.lock().await;
    let mut updated = 0;
    for id in ids.iter().collect::<HashSet<_>>() {
      if let Some(entry) = state.time_entries.get_mut(id) {
        if !entry.invoiced {
          entry.invoiced = true;
          updated += 1;
        }
      }
    }
    Ok(updated)
  }
}

#[async_trait]
impl InvoiceRepository for InMemoryStore {
  async fn create_with_lines(
    &self,
    invoice: Invoice,
    lines: Vec<InvoiceLine>,
  ) -> Result<Invoice, RepositoryError> {
    let mut state = self.state.lock().await;

    if state.invoices.contains_key(&invoice.id) {
      return Err(RepositoryError::DuplicateKey("invoices_pkey".to_string()));
    }
    if state.invoices.values().any(|i| i.number == invoice.number) {
      return Err(RepositoryError::DuplicateKey(
        "invoices_number_key".to_string(),
      ));
    }

    // Validate every flag flip before touching anything.
    let entry_ids: Vec<Uuid> = lines.iter().filter_map(|l| l.time_entry_id).collect();
    for id in &entry_ids {
      let available = state
        .time_entries
        .get(id)
        .is_some_and(|e| e.client_id == invoice.client_id && !e.invoiced);
      if !available {
        return Err(RepositoryError::Conflict(format!(
          "time entry {} cannot be invoiced",
          id
        )));
      }
    }

    for id in &entry_ids {
      if let Some(entry) = state.time_entries.get_mut(id) {
        entry.invoiced = true;
      }
    }
    state.invoice_lines.extend(lines);
    state.invoices.insert(invoice.id, invoice.clone());
    Ok(invoice)
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Invoice>, RepositoryError> {
    Ok(self.state.lock().await.invoices.get(&id).cloned())
  }

  async fn find_lines(&self, invoice_id: Uuid) -> Result<Vec<InvoiceLine>, RepositoryError> {
    let state = self.state.lock().await;
    Ok(
      state
        .invoice_lines
        .iter()
        .filter(|l| l.invoice_id == invoice_id)
        .cloned()
        .collect(),
    )
  }

  async fn find_all(&self) -> Result<Vec<Invoice>, RepositoryError> {
    let state = self.state.lock().await;
    let mut invoices: Vec<Invoice> = state.invoices.values().cloned().collect();
    invoices.sort_by(|a, b| {
      b.issue_date
        .cmp(&a.issue_date)
        .then(b.number.cmp(&a.number))
    });
    Ok(invoices)
  }

  async fn update_status(
    &self,
    id: Uuid,
    status: &InvoiceStatus,
  ) -> Result<bool, RepositoryError> {
    let mut state = self.state.lock().await;
    match state.invoices.get_mut(&id) {
      Some(invoice) => {
        invoice.status = status.clone();
        Ok(true)
      }
      None => Ok(false),
    }
  }

  async fn delete_with_lines(&self, id: Uuid) -> Result<Option<Vec<Uuid>>, RepositoryError> {
    let mut state = self.state.lock().await;
    if !state.invoices.contains_key(&id) {
      return Ok(None);
    }

    let released: Vec<Uuid> = state
      .invoice_lines
      .iter()
      .filter(|l| l.invoice_id == id)
      .filter_map(|l| l.time_entry_id)
      .collect();
    for entry_id in &released {
      if let Some(entry) = state.time_entries.get_mut(entry_id) {
        entry.invoiced = false;
      }
    }
    state.invoice_lines.retain(|l| l.invoice_id != id);
    state.invoices.remove(&id);
    Ok(Some(released))
  }
}

#[async_trait]
impl CounterRepository for InMemoryStore {
  async fn next_value(&self, key: &str, seed: i64) -> Result<i64, RepositoryError> {
    let mut state = self.state.lock().await;
    let value = state.counters.entry(key.to_string()).or_insert(seed);
    let current = *value;
    *value += 1;
    Ok(current)
  }
}
