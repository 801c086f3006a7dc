use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::tracking::value_objects::ValueObjectError;

// Invoice Number - issued by the counter, never reused
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct InvoiceNumber(i64);

impl InvoiceNumber {
  pub fn new(value: i64) -> Result<Self, ValueObjectError> {
    if value <= 0 {
      return Err(ValueObjectError::InvalidInvoiceNumber(format!(
        "Invoice number must be positive, got {}",
        value
      )));
    }
    Ok(Self(value))
  }

  pub fn value(&self) -> i64 {
    self.0
  }
}

impl TryFrom<i64> for InvoiceNumber {
  type Error = ValueObjectError;

  fn try_from(value: i64) -> Result<Self, Self::Error> {
    Self::new(value)
  }
}

impl From<InvoiceNumber> for i64 {
  fn from(number: InvoiceNumber) -> Self {
    number.0
  }
}

impl fmt::Display for InvoiceNumber {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

/// Matches the `status VARCHAR(32)` column.
const MAX_STATUS_CHARS: usize = 32;

// Invoice Status - open set of labels (draft, sent, paid, ...); transitions are not enforced
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct InvoiceStatus(String);

impl InvoiceStatus {
  pub fn new(value: String) -> Result<Self, ValueObjectError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
      return Err(ValueObjectError::InvalidStatus(
        "Invoice status must be set".to_string(),
      ));
    }
    if trimmed.chars().count() > MAX_STATUS_CHARS {
      return Err(ValueObjectError::InvalidStatus(format!(
        "Invoice status cannot exceed {} characters",
        MAX_STATUS_CHARS
      )));
    }
    Ok(Self(trimmed.to_string()))
  }

  pub fn draft() -> Self {
    Self("draft".to_string())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl Default for InvoiceStatus {
  fn default() -> Self {
    Self::draft()
  }
}

impl TryFrom<String> for InvoiceStatus {
  type Error = ValueObjectError;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    Self::new(value)
  }
}

impl From<InvoiceStatus> for String {
  fn from(status: InvoiceStatus) -> Self {
    status.0
  }
}

impl fmt::Display for InvoiceStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}
