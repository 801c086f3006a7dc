use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::tracking::{
  DurationSeconds, NewTimeEntry, TimeEntry, TrackingError, TrackingService,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogTimeEntryCommand {
  pub id: Option<Uuid>,
  pub todo_id: Option<Uuid>,
  pub client_id: Uuid,
  pub project_id: Uuid,
  pub start_at: DateTime<Utc>,
  pub end_at: DateTime<Utc>,
  pub duration_seconds: i64,
  pub note: Option<String>,
  /// Tracked time is billable unless stated otherwise.
  pub billable: Option<bool>,
}

pub struct LogTimeEntryUseCase {
  tracking_service: Arc<TrackingService>,
}

impl LogTimeEntryUseCase {
  pub fn new(tracking_service: Arc<TrackingService>) -> Self {
    Self { tracking_service }
  }

  pub async fn execute(&self, command: LogTimeEntryCommand) -> Result<TimeEntry, TrackingError> {
    let data = NewTimeEntry {
      id: command.id,
      todo_id: command.todo_id,
      client_id: command.client_id,
      project_id: command.project_id,
      start_at: command.start_at,
      end_at: command.end_at,
      duration: DurationSeconds::new(command.duration_seconds)?,
      note: command.note.unwrap_or_default(),
      billable: command.billable.unwrap_or(true),
    };

    self.tracking_service.log_time_entry(data).await
  }
}
