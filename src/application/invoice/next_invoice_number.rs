use serde::Serialize;
use std::sync::Arc;

use crate::domain::invoice::{InvoiceError, InvoiceService};

#[derive(Debug, Serialize)]
pub struct NextInvoiceNumberResponse {
  pub number: i64,
}

pub struct NextInvoiceNumberUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl NextInvoiceNumberUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(&self) -> Result<NextInvoiceNumberResponse, InvoiceError> {
    let number = self.invoice_service.next_invoice_number().await?;
    Ok(NextInvoiceNumberResponse {
      number: number.value(),
    })
  }
}
