use serde::Serialize;
use std::sync::Arc;

use crate::domain::invoice::{Invoice, InvoiceError, InvoiceService};

#[derive(Debug, Serialize)]
pub struct ListInvoicesResponse {
  pub invoices: Vec<Invoice>,
}

pub struct ListInvoicesUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl ListInvoicesUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(&self) -> Result<ListInvoicesResponse, InvoiceError> {
    let invoices = self.invoice_service.list_invoices().await?;
    Ok(ListInvoicesResponse { invoices })
  }
}
