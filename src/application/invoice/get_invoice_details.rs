use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::invoice::{Invoice, InvoiceError, InvoiceLine, InvoiceService};

#[derive(Debug, Deserialize)]
pub struct GetInvoiceDetailsCommand {
  pub invoice_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct InvoiceDetailsResponse {
  #[serde(flatten)]
  pub invoice: Invoice,
  pub lines: Vec<InvoiceLine>,
}

pub struct GetInvoiceDetailsUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl GetInvoiceDetailsUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(
    &self,
    command: GetInvoiceDetailsCommand,
  ) -> Result<InvoiceDetailsResponse, InvoiceError> {
    let (invoice, lines) = self
      .invoice_service
      .get_invoice(command.invoice_id)
      .await?;
    Ok(InvoiceDetailsResponse { invoice, lines })
  }
}
