use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::invoice::{InvoiceError, InvoiceService};

#[derive(Debug, Deserialize)]
pub struct DeleteInvoiceCommand {
  pub invoice_id: Uuid,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteInvoiceResponse {
  pub invoice_id: Uuid,
  pub released_entries: Vec<Uuid>,
}

pub struct DeleteInvoiceUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl DeleteInvoiceUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(
    &self,
    command: DeleteInvoiceCommand,
  ) -> Result<DeleteInvoiceResponse, InvoiceError> {
    let released_entries = self
      .invoice_service
      .delete_invoice(command.invoice_id)
      .await?;

    Ok(DeleteInvoiceResponse {
      invoice_id: command.invoice_id,
      released_entries,
    })
  }
}
