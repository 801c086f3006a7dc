use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;

use crate::domain::reporting::{ReportingError, ReportingService};

#[derive(Debug, Serialize)]
pub struct UninvoicedAmountResponse {
  pub amount: Decimal,
}

pub struct GetUninvoicedAmountUseCase {
  reporting_service: Arc<ReportingService>,
}

impl GetUninvoicedAmountUseCase {
  pub fn new(reporting_service: Arc<ReportingService>) -> Self {
    Self { reporting_service }
  }

  pub async fn execute(&self) -> Result<UninvoicedAmountResponse, ReportingError> {
    let amount = self.reporting_service.uninvoiced_amount().await?;
    Ok(UninvoicedAmountResponse { amount })
  }
}
