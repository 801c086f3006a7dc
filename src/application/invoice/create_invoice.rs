use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::invoice::{
  DraftLine, Invoice, InvoiceData, InvoiceError, InvoiceNumber, InvoiceService, InvoiceStatus,
  InvoiceTotals,
};
use crate::domain::tracking::CurrencyCode;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvoiceCommand {
  pub client_id: Uuid,
  /// Obtained beforehand from the invoice number counter.
  pub number: i64,
  pub issue_date: Option<NaiveDate>,
  pub due_date: Option<NaiveDate>,
  pub currency: Option<String>,
  pub status: Option<String>,
  pub totals: InvoiceTotals,
  pub lines: Vec<DraftLine>,
}

pub struct CreateInvoiceUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl CreateInvoiceUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(&self, command: CreateInvoiceCommand) -> Result<Invoice, InvoiceError> {
    let currency = command
      .currency
      .as_deref()
      .filter(|code| !code.trim().is_empty())
      .map(CurrencyCode::new)
      .transpose()?;
    let status = command.status.map(InvoiceStatus::new).transpose()?;

    let data = InvoiceData {
      client_id: command.client_id,
      number: InvoiceNumber::new(command.number)?,
      issue_date: command
        .issue_date
        .unwrap_or_else(|| Utc::now().date_naive()),
      due_date: command.due_date,
      currency,
      status,
      totals: command.totals,
      lines: command.lines,
    };

    self.invoice_service.create_invoice(data).await
  }
}
