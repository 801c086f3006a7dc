use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::invoice::{InvoiceError, InvoicePreview, InvoiceService};
use crate::domain::tracking::DateRange;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewInvoiceCommand {
  pub client_id: Uuid,
  /// `YYYY-MM-DD` or RFC 3339; only the date part is used.
  pub start: String,
  pub end: String,
  pub project_id: Option<Uuid>,
}

pub struct PreviewInvoiceUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl PreviewInvoiceUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(
    &self,
    command: PreviewInvoiceCommand,
  ) -> Result<InvoicePreview, InvoiceError> {
    let range = DateRange::parse(&command.start, &command.end)?;
    self
      .invoice_service
      .preview(command.client_id, range, command.project_id)
      .await
  }
}
