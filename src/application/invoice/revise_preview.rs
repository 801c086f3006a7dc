use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::sync::Arc;

use crate::domain::invoice::{DraftEdit, InvoiceDraft, InvoiceError, InvoiceService, ManualLine};

/// One pre-commit edit, tagged by `op`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum DraftEditCommand {
  AddManualLine {
    date: Option<NaiveDate>,
    project: Option<String>,
    description: Option<String>,
    hours: Decimal,
    rate: Decimal,
  },
  SetRate {
    index: usize,
    rate: Decimal,
  },
  SetDescription {
    index: usize,
    description: String,
  },
}

impl DraftEditCommand {
  fn into_edit(self, today: NaiveDate) -> DraftEdit {
    match self {
      DraftEditCommand::AddManualLine {
        date,
        project,
        description,
        hours,
        rate,
      } => DraftEdit::AddManualLine(ManualLine {
        date: date.unwrap_or(today),
        project: project.unwrap_or_default(),
        description: description.unwrap_or_default(),
        hours,
        rate,
      }),
      DraftEditCommand::SetRate { index, rate } => DraftEdit::SetRate { index, rate },
      DraftEditCommand::SetDescription { index, description } => {
        DraftEdit::SetDescription { index, description }
      }
    }
  }
}

#[derive(Debug, Deserialize)]
pub struct RevisePreviewCommand {
  pub draft: InvoiceDraft,
  #[serde(default)]
  pub edits: Vec<DraftEditCommand>,
}

/// Applies edits to a preview the caller holds. Nothing is stored.
pub struct RevisePreviewUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl RevisePreviewUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub fn execute(&self, command: RevisePreviewCommand) -> Result<InvoiceDraft, InvoiceError> {
    let today = Utc::now().date_naive();
    let edits = command
      .edits
      .into_iter()
      .map(|edit| edit.into_edit(today))
      .collect();
    self.invoice_service.revise(command.draft, edits)
  }
}
