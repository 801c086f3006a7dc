use serde::Deserialize;
use std::sync::Arc;

use crate::domain::reporting::{RangeSummary, ReportingError, ReportingService};
use crate::domain::tracking::DateRange;

#[derive(Debug, Deserialize)]
pub struct SummarizeRangeCommand {
  pub start: String,
  pub end: String,
}

pub struct SummarizeRangeUseCase {
  reporting_service: Arc<ReportingService>,
}

impl SummarizeRangeUseCase {
  pub fn new(reporting_service: Arc<ReportingService>) -> Self {
    Self { reporting_service }
  }

  pub async fn execute(
    &self,
    command: SummarizeRangeCommand,
  ) -> Result<RangeSummary, ReportingError> {
    let range = DateRange::parse(&command.start, &command.end)?;
    self.reporting_service.summary_range(range).await
  }
}
