use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::invoice::{InvoiceError, InvoiceService};

#[derive(Debug, Deserialize)]
pub struct MarkEntriesInvoicedCommand {
  pub ids: Vec<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct MarkEntriesInvoicedResponse {
  pub requested: usize,
  pub updated: u64,
}

pub struct MarkEntriesInvoicedUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl MarkEntriesInvoicedUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(
    &self,
    command: MarkEntriesInvoicedCommand,
  ) -> Result<MarkEntriesInvoicedResponse, InvoiceError> {
    let updated = self
      .invoice_service
      .mark_entries_invoiced(&command.ids)
      .await?;

    Ok(MarkEntriesInvoicedResponse {
      requested: command.ids.len(),
      updated,
    })
  }
}
