use std::sync::Arc;
use uuid::Uuid;

use super::entities::{BankDetails, Client, NewTimeEntry, PayoneerDetails, Project, TimeEntry, Todo};
use super::errors::TrackingError;
use super::ports::{ClientRepository, ProjectRepository, TimeEntryRepository, TodoRepository};
use super::value_objects::{
  ClientName, CurrencyCode, HourlyRate, ProjectName, ProjectStatus, TodoStatus, TodoTitle,
};

/// Client creation data
pub struct ClientData {
  pub id: Option<Uuid>,
  pub name: ClientName,
  pub address: String,
  pub email: String,
  pub currency: CurrencyCode,
  pub default_rate: HourlyRate,
  pub terms: String,
  pub payoneer: PayoneerDetails,
  pub bank: BankDetails,
}

/// Project creation data
pub struct ProjectData {
  pub id: Option<Uuid>,
  pub client_id: Uuid,
  pub name: ProjectName,
  pub rate_override: Option<HourlyRate>,
  pub status: ProjectStatus,
}

/// To-do creation data
pub struct TodoData {
  pub id: Option<Uuid>,
  pub project_id: Uuid,
  pub title: TodoTitle,
  pub estimate_minutes: i32,
  pub status: TodoStatus,
}

pub struct TrackingService {
  client_repo: Arc<dyn ClientRepository>,
  project_repo: Arc<dyn ProjectRepository>,
  todo_repo: Arc<dyn TodoRepository>,
  time_entry_repo: Arc<dyn TimeEntryRepository>,
}

impl TrackingService {
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

  // Client operations
  pub async fn create_client(&self, data: ClientData) -> Result<Client, TrackingError> {
    let mut client = Client::new(data.id, data.name, data.currency, data.default_rate);
    client.address = data.address;
    client.email = data.email;
    client.terms = data.terms;
    client.payoneer = data.payoneer;
    client.bank = data.bank;

    let client = self.client_repo.create(client).await?;
    tracing::info!(client_id = %client.id, "Client created");
    Ok(client)
  }

  pub async fn list_clients(&self) -> Result<Vec<Client>, TrackingError> {
    Ok(self.client_repo.find_all().await?)
  }

  // Project operations
  pub async fn create_project(&self, data: ProjectData) -> Result<Project, TrackingError> {
    self
      .client_repo
      .find_by_id(data.client_id)
      .await?
      .ok_or(TrackingError::ClientNotFound(data.client_id))?;

    let project = Project::new(
      data.id,
      data.client_id,
      data.name,
      data.rate_override,
      data.status,
    );
    let project = self.project_repo.create(project).await?;
    tracing::info!(project_id = %project.id, client_id = %project.client_id, "Project created");
    Ok(project)
  }

  pub async fn list_projects(&self) -> Result<Vec<Project>, TrackingError> {
    Ok(self.project_repo.find_all().await?)
  }

  // To-do operations
  pub async fn create_todo(&self, data: TodoData) -> Result<Todo, TrackingError> {
    self
      .project_repo
      .find_by_id(data.project_id)
      .await?
      .ok_or(TrackingError::ProjectNotFound(data.project_id))?;

    let todo = Todo::new(
      data.id,
      data.project_id,
      data.title,
      data.estimate_minutes,
      data.status,
    )?;
    Ok(self.todo_repo.create(todo).await?)
  }

  pub async fn list_todos(&self) -> Result<Vec<Todo>, TrackingError> {
    Ok(self.todo_repo.find_all().await?)
  }

  // Time entry operations

  /// Records tracked time. Every reference is checked: the project must belong to the client
  /// and the to-do, when given, to the project.
  pub async fn log_time_entry(&self, data: NewTimeEntry) -> Result<TimeEntry, TrackingError> {
    self
      .client_repo
      .find_by_id(data.client_id)
      .await?
      .ok_or(TrackingError::ClientNotFound(data.client_id))?;

    let project = self
      .project_repo
      .find_by_id(data.project_id)
      .await?
      .ok_or(TrackingError::ProjectNotFound(data.project_id))?;

    if !project.belongs_to(data.client_id) {
      return Err(TrackingError::ProjectClientMismatch {
        project_id: project.id,
        client_id: data.client_id,
      });
    }

    if let Some(todo_id) = data.todo_id {
      let todo = self
        .todo_repo
        .find_by_id(todo_id)
        .await?
        .ok_or(TrackingError::TodoNotFound(todo_id))?;

      if todo.project_id != project.id {
        return Err(TrackingError::TodoProjectMismatch {
          todo_id,
          project_id: project.id,
        });
      }
    }

    let entry = TimeEntry::new(data)?;
    let entry = self.time_entry_repo.create(entry).await?;
    tracing::debug!(
      entry_id = %entry.id,
      duration_seconds = entry.duration_seconds,
      "Time entry logged"
    );
    Ok(entry)
  }

  pub async fn recent_entries(&self, limit: u32) -> Result<Vec<TimeEntry>, TrackingError> {
    Ok(self.time_entry_repo.find_recent(limit).await?)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::tracking::value_objects::DurationSeconds;
  use crate::infrastructure::persistence::memory::InMemoryStore;
  use chrono::{TimeZone, Utc};
  use rust_decimal_macros::dec;

  fn service(store: &Arc<InMemoryStore>) -> TrackingService {
    TrackingService::new(store.clone(), store.clone(), store.clone(), store.clone())
  }

  fn client_data(name: &str) -> ClientData {
    ClientData {
      id: None,
      name: ClientName::new(name.to_string()).unwrap(),
      address: String::new(),
      email: String::new(),
      currency: CurrencyCode::usd(),
      default_rate: HourlyRate::new(dec!(50)).unwrap(),
      terms: String::new(),
      payoneer: PayoneerDetails::default(),
      bank: BankDetails::default(),
    }
  }

  fn project_data(client_id: Uuid) -> ProjectData {
    ProjectData {
      id: None,
      client_id,
      name: ProjectName::new("Website".to_string()).unwrap(),
      rate_override: None,
      status: ProjectStatus::Active,
    }
  }

  fn entry_data(client_id: Uuid, project_id: Uuid, todo_id: Option<Uuid>) -> NewTimeEntry {
    NewTimeEntry {
      id: None,
      todo_id,
      client_id,
      project_id,
      start_at: Utc.with_ymd_and_hms(2025, 5, 2, 9, 0, 0).unwrap(),
      end_at: Utc.with_ymd_and_hms(2025, 5, 2, 10, 0, 0).unwrap(),
      duration: DurationSeconds::new(3600).unwrap(),
      note: String::new(),
      billable: true,
    }
  }

  #[tokio::test]
  async fn test_project_requires_existing_client() {
    let store = Arc::new(InMemoryStore::new());
    let service = service(&store);

    let result = service.create_project(project_data(Uuid::new_v4())).await;
    assert!(matches!(result, Err(TrackingError::ClientNotFound(_))));
  }

  #[tokio::test]
  async fn test_time_entry_rejects_project_of_other_client() {
    let store = Arc::new(InMemoryStore::new());
    let service = service(&store);

    let acme = service.create_client(client_data("Acme")).await.unwrap();
    let globex = service.create_client(client_data("Globex")).await.unwrap();
    let project = service.create_project(project_data(acme.id)).await.unwrap();

    let result = service
      .log_time_entry(entry_data(globex.id, project.id, None))
      .await;
    assert!(matches!(
      result,
      Err(TrackingError::ProjectClientMismatch { .. })
    ));
  }

  #[tokio::test]
  async fn test_time_entry_rejects_todo_of_other_project() {
    let store = Arc::new(InMemoryStore::new());
    let service = service(&store);

    let acme = service.create_client(client_data("Acme")).await.unwrap();
    let site = service.create_project(project_data(acme.id)).await.unwrap();
    let mut other = project_data(acme.id);
    other.name = ProjectName::new("Mobile app".to_string()).unwrap();
    let app = service.create_project(other).await.unwrap();
    let todo = service
      .create_todo(TodoData {
        id: None,
        project_id: app.id,
        title: TodoTitle::new("Login screen".to_string()).unwrap(),
        estimate_minutes: 60,
        status: TodoStatus::Open,
      })
      .await
      .unwrap();

    let result = service
      .log_time_entry(entry_data(acme.id, site.id, Some(todo.id)))
      .await;
    assert!(matches!(
      result,
      Err(TrackingError::TodoProjectMismatch { .. })
    ));

    let logged = service
      .log_time_entry(entry_data(acme.id, app.id, Some(todo.id)))
      .await
      .unwrap();
    assert_eq!(logged.todo_id, Some(todo.id));
    assert!(!logged.invoiced);
  }

  #[tokio::test]
  async fn test_recent_entries_newest_first() {
    let store = Arc::new(InMemoryStore::new());
    let service = service(&store);

    let acme = service.create_client(client_data("Acme")).await.unwrap();
    let project = service.create_project(project_data(acme.id)).await.unwrap();

    let mut early = entry_data(acme.id, project.id, None);
    early.start_at = Utc.with_ymd_and_hms(2025, 5, 1, 9, 0, 0).unwrap();
    early.end_at = Utc.with_ymd_and_hms(2025, 5, 1, 9, 30, 0).unwrap();
    service.log_time_entry(early).await.unwrap();
    let late = service
      .log_time_entry(entry_data(acme.id, project.id, None))
      .await
      .unwrap();

    let recent = service.recent_entries(1).await.unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].id, late.id);
  }
}
