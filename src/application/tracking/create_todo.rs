use serde::Deserialize;
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::tracking::{
  Todo, TodoData, TodoStatus, TodoTitle, TrackingError, TrackingService,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoCommand {
  pub id: Option<Uuid>,
  pub project_id: Uuid,
  pub title: String,
  pub estimate_minutes: Option<i32>,
  pub status: Option<String>,
}

pub struct CreateTodoUseCase {
  tracking_service: Arc<TrackingService>,
}

impl CreateTodoUseCase {
  pub fn new(tracking_service: Arc<TrackingService>) -> Self {
    Self { tracking_service }
  }

  pub async fn execute(&self, command: CreateTodoCommand) -> Result<Todo, TrackingError> {
    let status = match command.status.as_deref() {
      Some(status) => TodoStatus::from_str(status)?,
      None => TodoStatus::default(),
    };

    let data = TodoData {
      id: command.id,
      project_id: command.project_id,
      title: TodoTitle::new(command.title)?,
      estimate_minutes: command.estimate_minutes.unwrap_or(0),
      status,
    };

    self.tracking_service.create_todo(data).await
  }
}
