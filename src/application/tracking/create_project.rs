use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::tracking::{
  HourlyRate, Project, ProjectData, ProjectName, ProjectStatus, TrackingError, TrackingService,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectCommand {
  pub id: Option<Uuid>,
  pub client_id: Uuid,
  pub name: String,
  pub rate_override: Option<Decimal>,
  pub status: Option<String>,
}

pub struct CreateProjectUseCase {
  tracking_service: Arc<TrackingService>,
}

impl CreateProjectUseCase {
  pub fn new(tracking_service: Arc<TrackingService>) -> Self {
    Self { tracking_service }
  }

  pub async fn execute(&self, command: CreateProjectCommand) -> Result<Project, TrackingError> {
    let status = match command.status.as_deref() {
      Some(status) => ProjectStatus::from_str(status)?,
      None => ProjectStatus::default(),
    };

    let data = ProjectData {
      id: command.id,
      client_id: command.client_id,
      name: ProjectName::new(command.name)?,
      rate_override: command.rate_override.map(HourlyRate::new).transpose()?,
      status,
    };

    self.tracking_service.create_project(data).await
  }
}
