use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::InvoiceError;
use super::pricing::{
  effective_rate, hours_to_seconds, line_amount, normalize_seconds, round_money,
};
use super::value_objects::{InvoiceNumber, InvoiceStatus};
use crate::domain::tracking::entities::{Client, Project, TimeEntry, Todo};
use crate::domain::tracking::value_objects::{CurrencyCode, HourlyRate, ValueObjectError};

const MANUAL_DESCRIPTION: &str = "Manual";

// DraftLine - one editable line of a preview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftLine {
  /// Source time entry; `None` for manually added lines.
  pub entry_id: Option<Uuid>,
  pub date: NaiveDate,
  #[serde(default)]
  pub start: String,
  #[serde(default)]
  pub end: String,
  #[serde(default)]
  pub project: String,
  pub description: String,
  #[serde(rename = "_seconds")]
  pub seconds: i64,
  pub display_seconds: i64,
  pub rate: Decimal,
  pub amount: Decimal,
}

impl DraftLine {
  /// Prices a tracked entry. `project` is only consulted for the rate when it belongs to the
  /// entry's client; a foreign or missing project falls back to the client rate.
  pub fn from_entry(
    entry: &TimeEntry,
    client: &Client,
    project: Option<&Project>,
    todo: Option<&Todo>,
  ) -> Result<Self, ValueObjectError> {
    let rate_source = project.filter(|p| p.belongs_to(client.id));
    let rate = effective_rate(rate_source, Some(client));
    let project_name = project.map(|p| p.name.value()).unwrap_or_default();
    let seconds = normalize_seconds(entry.duration_seconds);

    Ok(Self {
      entry_id: Some(entry.id),
      date: entry.start_date(),
      start: entry.start_clock(),
      end: entry.end_clock(),
      project: project_name.to_string(),
      description: describe(todo.map(|t| t.title.value()), &entry.note, project_name),
      seconds,
      display_seconds: seconds,
      rate,
      amount: line_amount(seconds, rate)?,
    })
  }

  pub fn manual(line: ManualLine) -> Result<Self, ValueObjectError> {
    if line.hours.is_sign_negative() && !line.hours.is_zero() {
      return Err(ValueObjectError::InvalidHours(
        "Hours cannot be negative".to_string(),
      ));
    }
    let rate = HourlyRate::new(line.rate)?.value();
    let seconds = hours_to_seconds(line.hours)?;
    let description = match line.description.trim() {
      "" => MANUAL_DESCRIPTION.to_string(),
      text => text.to_string(),
    };

    Ok(Self {
      entry_id: None,
      date: line.date,
      start: String::new(),
      end: String::new(),
      project: line.project.trim().to_string(),
      description,
      seconds,
      display_seconds: seconds,
      rate,
      amount: line_amount(seconds, rate)?,
    })
  }

  pub fn is_manual(&self) -> bool {
    self.entry_id.is_none()
  }

  fn reprice(&mut self, rate: Decimal) -> Result<(), ValueObjectError> {
    self.amount = line_amount(normalize_seconds(self.display_seconds), rate)?;
    self.rate = rate;
    Ok(())
  }
}

/// To-do title and note joined when both exist, else the first non-empty of note, to-do title,
/// project name.
fn describe(todo_title: Option<&str>, note: &str, project_name: &str) -> String {
  let title = todo_title.map(str::trim).unwrap_or_default();
  let note = note.trim();
  match (title.is_empty(), note.is_empty()) {
    (false, false) => format!("{} — {}", title, note),
    (_, false) => note.to_string(),
    (false, true) => title.to_string(),
    (true, true) => project_name.to_string(),
  }
}

/// A line typed in by hand before committing.
#[derive(Debug, Clone)]
pub struct ManualLine {
  pub date: NaiveDate,
  pub project: String,
  pub description: String,
  pub hours: Decimal,
  pub rate: Decimal,
}

// Totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceTotals {
  pub hours_seconds: i64,
  pub subtotal: Decimal,
  #[serde(default)]
  pub tax: Decimal,
  #[serde(default)]
  pub discount: Decimal,
  pub grand_total: Decimal,
}

impl InvoiceTotals {
  /// Fresh totals with tax and discount at zero. Line seconds are summed as stored.
  pub fn calculate(lines: &[DraftLine]) -> Self {
    Self::with_adjustments(lines, Decimal::ZERO, Decimal::ZERO)
  }

  /// Recomputes sums while carrying the existing tax and discount through unchanged.
  pub fn recalculate(&self, lines: &[DraftLine]) -> Self {
    Self::with_adjustments(lines, self.tax, self.discount)
  }

  fn with_adjustments(lines: &[DraftLine], tax: Decimal, discount: Decimal) -> Self {
    let hours_seconds = lines.iter().map(|line| line.seconds).sum();
    let subtotal = round_money(lines.iter().map(|line| line.amount).sum());

    // tax and discount are stored, not applied
    Self {
      hours_seconds,
      subtotal,
      tax,
      discount,
      grand_total: subtotal,
    }
  }
}

/// Edits a caller may apply to a draft before committing it.
#[derive(Debug, Clone)]
pub enum DraftEdit {
  AddManualLine(ManualLine),
  SetRate { index: usize, rate: Decimal },
  SetDescription { index: usize, description: String },
}

// InvoiceDraft - the editable, unpersisted body of an invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDraft {
  pub lines: Vec<DraftLine>,
  pub totals: InvoiceTotals,
  pub currency: CurrencyCode,
}

impl InvoiceDraft {
  pub fn new(lines: Vec<DraftLine>, currency: CurrencyCode) -> Self {
    let totals = InvoiceTotals::calculate(&lines);
    Self {
      lines,
      totals,
      currency,
    }
  }

  pub fn apply(&mut self, edit: DraftEdit) -> Result<(), InvoiceError> {
    match edit {
      DraftEdit::AddManualLine(line) => self.add_manual_line(line),
      DraftEdit::SetRate { index, rate } => self.set_line_rate(index, rate),
      DraftEdit::SetDescription { index, description } => {
        self.set_line_description(index, description)
      }
    }
  }

  pub fn add_manual_line(&mut self, line: ManualLine) -> Result<(), InvoiceError> {
    self.lines.push(DraftLine::manual(line)?);
    self.recompute_totals();
    Ok(())
  }

  pub fn set_line_rate(&mut self, index: usize, rate: Decimal) -> Result<(), InvoiceError> {
    let rate = HourlyRate::new(rate)?.value();
    self.line_mut(index)?.reprice(rate)?;
    self.recompute_totals();
    Ok(())
  }

  pub fn set_line_description(
    &mut self,
    index: usize,
    description: String,
  ) -> Result<(), InvoiceError> {
    self.line_mut(index)?.description = description;
    Ok(())
  }

  pub fn recompute_totals(&mut self) {
    self.totals = self.totals.recalculate(&self.lines);
  }

  /// Time entries referenced by the draft, in line order.
  pub fn entry_ids(&self) -> Vec<Uuid> {
    self.lines.iter().filter_map(|line| line.entry_id).collect()
  }

  fn line_mut(&mut self, index: usize) -> Result<&mut DraftLine, InvoiceError> {
    self
      .lines
      .get_mut(index)
      .ok_or(InvoiceError::LineNotFound(index))
  }
}

/// Preview result: the client plus its draft lines and totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoicePreview {
  pub client: Client,
  #[serde(flatten)]
  pub draft: InvoiceDraft,
}

// Invoice - a committed invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
  pub id: Uuid,
  pub client_id: Uuid,
  pub number: InvoiceNumber,
  pub issue_date: NaiveDate,
  pub due_date: NaiveDate,
  pub currency: CurrencyCode,
  pub status: InvoiceStatus,
  pub hours_seconds: i64,
  pub subtotal: Decimal,
  pub tax: Decimal,
  pub discount: Decimal,
  pub grand_total: Decimal,
  pub pdf_path: Option<String>,
  pub created_at: DateTime<Utc>,
}

impl Invoice {
  pub fn new(
    client_id: Uuid,
    number: InvoiceNumber,
    issue_date: NaiveDate,
    due_date: NaiveDate,
    currency: CurrencyCode,
    status: InvoiceStatus,
    totals: &InvoiceTotals,
  ) -> Self {
    Self {
      id: Uuid::new_v4(),
      client_id,
      number,
      issue_date,
      due_date,
      currency,
      status,
      hours_seconds: totals.hours_seconds,
      subtotal: totals.subtotal,
      tax: totals.tax,
      discount: totals.discount,
      grand_total: totals.grand_total,
      pdf_path: None,
      created_at: Utc::now(),
    }
  }
}

// InvoiceLine - a persisted line, owned by its invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceLine {
  pub id: Uuid,
  pub invoice_id: Uuid,
  pub time_entry_id: Option<Uuid>,
  pub date: NaiveDate,
  pub description: String,
  /// Normalized billing seconds, never the raw tracked duration.
  pub hours_seconds: i64,
  pub rate: Decimal,
  pub amount: Decimal,
  pub project_name: String,
  pub start: String,
  pub end: String,
}

impl InvoiceLine {
  pub fn from_draft(invoice_id: Uuid, line: &DraftLine) -> Self {
    Self {
      id: Uuid::new_v4(),
      invoice_id,
      time_entry_id: line.entry_id,
      date: line.date,
      description: line.description.clone(),
      hours_seconds: line.seconds,
      rate: line.rate,
      amount: line.amount,
      project_name: line.project.clone(),
      start: line.start.clone(),
      end: line.end.clone(),
    }
  }
}
