use serde::Deserialize;
use std::sync::Arc;

use crate::domain::reporting::{ReportingError, ReportingService};

const MAX_EXPORT_LIMIT: u32 = 1000;

#[derive(Debug, Default, Deserialize)]
pub struct ExportTimeEntriesCommand {
  pub limit: Option<u32>,
}

pub struct ExportTimeEntriesUseCase {
  reporting_service: Arc<ReportingService>,
  default_limit: u32,
}

impl ExportTimeEntriesUseCase {
  pub fn new(reporting_service: Arc<ReportingService>, default_limit: u32) -> Self {
    Self {
      reporting_service,
      default_limit,
    }
  }

  /// Returns the CSV document as bytes.
  pub async fn execute(
    &self,
    command: ExportTimeEntriesCommand,
  ) -> Result<Vec<u8>, ReportingError> {
    let limit = command
      .limit
      .unwrap_or(self.default_limit)
      .clamp(1, MAX_EXPORT_LIMIT);
    self.reporting_service.export_time_entries_csv(limit).await
  }
}
