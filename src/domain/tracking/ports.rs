use async_trait::async_trait;
use uuid::Uuid;

use super::entities::{Client, DateRange, Project, TimeEntry, Todo};
use super::errors::RepositoryError;

#[async_trait]
pub trait ClientRepository: Send + Sync {
  async fn create(&self, client: Client) -> Result<Client, RepositoryError>;
  async fn find_by_id(&self, id: Uuid) -> Result<Option<Client>, RepositoryError>;
  /// All clients ordered by name.
  async fn find_all(&self) -> Result<Vec<Client>, RepositoryError>;
}

#[async_trait]
pub trait ProjectRepository: Send + Sync {
  async fn create(&self, project: Project) -> Result<Project, RepositoryError>;
  async fn find_by_id(&self, id: Uuid) -> Result<Option<Project>, RepositoryError>;
  async fn find_by_client_id(&self, client_id: Uuid) -> Result<Vec<Project>, RepositoryError>;
  /// All projects ordered by name.
  async fn find_all(&self) -> Result<Vec<Project>, RepositoryError>;
}

#[async_trait]
pub trait TodoRepository: Send + Sync {
  async fn create(&self, todo: Todo) -> Result<Todo, RepositoryError>;
  async fn find_by_id(&self, id: Uuid) -> Result<Option<Todo>, RepositoryError>;
  async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Todo>, RepositoryError>;
  /// All to-dos ordered by title.
  async fn find_all(&self) -> Result<Vec<Todo>, RepositoryError>;
}

#[async_trait]
pub trait TimeEntryRepository: Send + Sync {
  async fn create(&self, entry: TimeEntry) -> Result<TimeEntry, RepositoryError>;
  async fn find_by_id(&self, id: Uuid) -> Result<Option<TimeEntry>, RepositoryError>;

  /// Un-invoiced entries of a client inside the date range, oldest first.
  async fn find_uninvoiced_for_client(
    &self,
    client_id: Uuid,
    range: DateRange,
    project_id: Option<Uuid>,
  ) -> Result<Vec<TimeEntry>, RepositoryError>;

  /// Every entry (any client, billed or not) inside the date range.
  async fn find_in_range(&self, range: DateRange) -> Result<Vec<TimeEntry>, RepositoryError>;

  /// Billable entries that no invoice references yet.
  async fn find_uninvoiced_billable(&self) -> Result<Vec<TimeEntry>, RepositoryError>;

  /// Newest first by `start_at`.
  async fn find_recent(&self, limit: u32) -> Result<Vec<TimeEntry>, RepositoryError>;

  /// Sets `invoiced = true` on the given ids in one transaction; unknown ids are skipped.
  /// Returns the number of rows updated.
  async fn mark_invoiced(&self, ids: &[Uuid]) -> Result<u64, RepositoryError>;
}
