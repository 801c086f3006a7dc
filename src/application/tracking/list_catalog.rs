use serde::Serialize;
use std::sync::Arc;

use crate::domain::tracking::{Client, Project, Todo, TrackingError, TrackingService};

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
  pub clients: Vec<Client>,
  pub projects: Vec<Project>,
  pub todos: Vec<Todo>,
}

/// Lists clients, projects and to-dos; each list keeps the store's ordering.
pub struct ListCatalogUseCase {
  tracking_service: Arc<TrackingService>,
}

impl ListCatalogUseCase {
  pub fn new(tracking_service: Arc<TrackingService>) -> Self {
    Self { tracking_service }
  }

  pub async fn clients(&self) -> Result<Vec<Client>, TrackingError> {
    self.tracking_service.list_clients().await
  }

  pub async fn projects(&self) -> Result<Vec<Project>, TrackingError> {
    self.tracking_service.list_projects().await
  }

  pub async fn todos(&self) -> Result<Vec<Todo>, TrackingError> {
    self.tracking_service.list_todos().await
  }

  pub async fn execute(&self) -> Result<CatalogResponse, TrackingError> {
    Ok(CatalogResponse {
      clients: self.clients().await?,
      projects: self.projects().await?,
      todos: self.todos().await?,
    })
  }
}
