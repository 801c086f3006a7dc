use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::invoice::{InvoiceError, InvoiceService, InvoiceStatus};

#[derive(Debug, Deserialize)]
pub struct ChangeInvoiceStatusCommand {
  pub invoice_id: Uuid,
  pub new_status: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeInvoiceStatusResponse {
  pub invoice_id: Uuid,
  pub status: String,
}

pub struct ChangeInvoiceStatusUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl ChangeInvoiceStatusUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(
    &self,
    command: ChangeInvoiceStatusCommand,
  ) -> Result<ChangeInvoiceStatusResponse, InvoiceError> {
    let status = InvoiceStatus::new(command.new_status)?;

    self
      .invoice_service
      .set_status(command.invoice_id, status.clone())
      .await?;

    Ok(ChangeInvoiceStatusResponse {
      invoice_id: command.invoice_id,
      status: status.as_str().to_string(),
    })
  }
}
