use serde::Deserialize;
use std::sync::Arc;

use crate::domain::tracking::{TimeEntry, TrackingError, TrackingService};

const MAX_RECENT_LIMIT: u32 = 1000;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRecentEntriesCommand {
  pub limit: Option<u32>,
}

pub struct ListRecentEntriesUseCase {
  tracking_service: Arc<TrackingService>,
  default_limit: u32,
}

impl ListRecentEntriesUseCase {
  pub fn new(tracking_service: Arc<TrackingService>, default_limit: u32) -> Self {
    Self {
      tracking_service,
      default_limit,
    }
  }

  /// Newest entries first with their raw durations.
  pub async fn execute(
    &self,
    command: ListRecentEntriesCommand,
  ) -> Result<Vec<TimeEntry>, TrackingError> {
    let limit = command
      .limit
      .unwrap_or(self.default_limit)
      .clamp(1, MAX_RECENT_LIMIT);
    self.tracking_service.recent_entries(limit).await
  }
}
