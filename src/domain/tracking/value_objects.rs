use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueObjectError {
  #[error("Invalid client name: {0}")]
  InvalidClientName(String),
  #[error("Invalid project name: {0}")]
  InvalidProjectName(String),
  #[error("Invalid to-do title: {0}")]
  InvalidTodoTitle(String),
  #[error("Invalid currency code: {0}")]
  InvalidCurrency(String),
  #[error("Invalid rate: {0}")]
  InvalidRate(String),
  #[error("Invalid duration: {0}")]
  InvalidDuration(String),
  #[error("Invalid estimate: {0}")]
  InvalidEstimate(String),
  #[error("Invalid status: {0}")]
  InvalidStatus(String),
  #[error("Invalid time range: {0}")]
  InvalidTimeRange(String),
  #[error("Invalid date: {0}")]
  InvalidDate(String),
  #[error("Invalid invoice number: {0}")]
  InvalidInvoiceNumber(String),
  #[error("Invalid hours: {0}")]
  InvalidHours(String),
  #[error("Amount out of range: {0}")]
  AmountOutOfRange(String),
}

fn non_empty(
  value: String,
  max_len: usize,
  what: &str,
  err: fn(String) -> ValueObjectError,
) -> Result<String, ValueObjectError> {
  let trimmed = value.trim();
  if trimmed.is_empty() {
    return Err(err(format!("{} cannot be empty", what)));
  }
  if trimmed.len() > max_len {
    return Err(err(format!("{} cannot exceed {} characters", what, max_len)));
  }
  Ok(trimmed.to_string())
}

// Client Name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClientName(String);

impl ClientName {
  pub fn new(value: String) -> Result<Self, ValueObjectError> {
    non_empty(value, 255, "Client name", ValueObjectError::InvalidClientName).map(Self)
  }

  pub fn value(&self) -> &str {
    &self.0
  }
}

impl TryFrom<String> for ClientName {
  type Error = ValueObjectError;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    Self::new(value)
  }
}

impl From<ClientName> for String {
  fn from(name: ClientName) -> Self {
    name.0
  }
}

// Project Name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProjectName(String);

impl ProjectName {
  pub fn new(value: String) -> Result<Self, ValueObjectError> {
    non_empty(value, 255, "Project name", ValueObjectError::InvalidProjectName).map(Self)
  }

  pub fn value(&self) -> &str {
    &self.0
  }
}

impl TryFrom<String> for ProjectName {
  type Error = ValueObjectError;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    Self::new(value)
  }
}

impl From<ProjectName> for String {
  fn from(name: ProjectName) -> Self {
    name.0
  }
}

// To-do Title
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TodoTitle(String);

impl TodoTitle {
  pub fn new(value: String) -> Result<Self, ValueObjectError> {
    non_empty(value, 500, "To-do title", ValueObjectError::InvalidTodoTitle).map(Self)
  }

  pub fn value(&self) -> &str {
    &self.0
  }
}

impl TryFrom<String> for TodoTitle {
  type Error = ValueObjectError;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    Self::new(value)
  }
}

impl From<TodoTitle> for String {
  fn from(title: TodoTitle) -> Self {
    title.0
  }
}

// Currency - ISO 4217 code, passed through untouched by billing
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
  pub fn new(value: &str) -> Result<Self, ValueObjectError> {
    let code = value.trim().to_uppercase();
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
      return Err(ValueObjectError::InvalidCurrency(format!(
        "Expected a 3-letter ISO code, got '{}'",
        value
      )));
    }
    Ok(Self(code))
  }

  pub fn usd() -> Self {
    Self("USD".to_string())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl Default for CurrencyCode {
  fn default() -> Self {
    Self::usd()
  }
}

impl FromStr for CurrencyCode {
  type Err = ValueObjectError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::new(s)
  }
}

impl TryFrom<String> for CurrencyCode {
  type Error = ValueObjectError;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    Self::new(&value)
  }
}

impl From<CurrencyCode> for String {
  fn from(code: CurrencyCode) -> Self {
    code.0
  }
}

impl fmt::Display for CurrencyCode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

/// Rates are stored as NUMERIC(14, 4).
pub const MAX_RATE_SCALE: u32 = 4;
const MAX_RATE_DIGITS: u32 = 10;

/// One entry can cover at most a leap year of tracked time.
pub const MAX_DURATION_SECONDS: i64 = 366 * 24 * 3600;

// Hourly Rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct HourlyRate(Decimal);

impl HourlyRate {
  pub fn new(value: Decimal) -> Result<Self, ValueObjectError> {
    if value.is_sign_negative() && !value.is_zero() {
      return Err(ValueObjectError::InvalidRate(
        "Rate cannot be negative".to_string(),
      ));
    }
    if value.normalize().scale() > MAX_RATE_SCALE {
      return Err(ValueObjectError::InvalidRate(format!(
        "Rate cannot have more than {} decimal places",
        MAX_RATE_SCALE
      )));
    }
    if value >= Decimal::from(10_i64.pow(MAX_RATE_DIGITS)) {
      return Err(ValueObjectError::InvalidRate(format!(
        "Rate must be below 10^{}",
        MAX_RATE_DIGITS
      )));
    }
    Ok(Self(value))
  }

  pub fn zero() -> Self {
    Self(Decimal::ZERO)
  }

  pub fn value(&self) -> Decimal {
    self.0
  }
}

impl TryFrom<Decimal> for HourlyRate {
  type Error = ValueObjectError;

  fn try_from(value: Decimal) -> Result<Self, Self::Error> {
    Self::new(value)
  }
}

impl From<HourlyRate> for Decimal {
  fn from(rate: HourlyRate) -> Self {
    rate.0
  }
}

// Raw tracked duration, as reported by the tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct DurationSeconds(i64);

impl DurationSeconds {
  pub fn new(value: i64) -> Result<Self, ValueObjectError> {
    if value <= 0 {
      return Err(ValueObjectError::InvalidDuration(
        "durationSeconds must be > 0".to_string(),
      ));
    }
    if value > MAX_DURATION_SECONDS {
      return Err(ValueObjectError::InvalidDuration(format!(
        "durationSeconds cannot exceed {}",
        MAX_DURATION_SECONDS
      )));
    }
    Ok(Self(value))
  }

  pub fn value(&self) -> i64 {
    self.0
  }
}

impl TryFrom<i64> for DurationSeconds {
  type Error = ValueObjectError;

  fn try_from(value: i64) -> Result<Self, Self::Error> {
    Self::new(value)
  }
}

impl From<DurationSeconds> for i64 {
  fn from(duration: DurationSeconds) -> Self {
    duration.0
  }
}

// Project Status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
  #[default]
  Active,
  Archived,
}

impl ProjectStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      ProjectStatus::Active => "active",
      ProjectStatus::Archived => "archived",
    }
  }
}

impl FromStr for ProjectStatus {
  type Err = ValueObjectError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "active" => Ok(ProjectStatus::Active),
      "archived" => Ok(ProjectStatus::Archived),
      _ => Err(ValueObjectError::InvalidStatus(format!(
        "Unknown project status: {}",
        s
      ))),
    }
  }
}

// To-do Status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TodoStatus {
  #[default]
  Open,
  Done,
}

impl TodoStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      TodoStatus::Open => "open",
      TodoStatus::Done => "done",
    }
  }
}

impl FromStr for TodoStatus {
  type Err = ValueObjectError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "open" => Ok(TodoStatus::Open),
      "done" => Ok(TodoStatus::Done),
      _ => Err(ValueObjectError::InvalidStatus(format!(
        "Unknown to-do status: {}",
        s
      ))),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rust_decimal_macros::dec;

  #[test]
  fn test_names_are_trimmed_and_required() {
    assert_eq!(
      ClientName::new("  Acme  ".to_string()).unwrap().value(),
      "Acme"
    );
    assert!(ClientName::new("   ".to_string()).is_err());
    assert!(ProjectName::new(String::new()).is_err());
    assert!(TodoTitle::new("x".repeat(501)).is_err());
  }

  #[test]
  fn test_currency() {
    assert_eq!(CurrencyCode::new("eur").unwrap().as_str(), "EUR");
    assert_eq!(CurrencyCode::default().as_str(), "USD");
    assert!(CurrencyCode::new("EURO").is_err());
    assert!(CurrencyCode::new("U5D").is_err());
  }

  #[test]
  fn test_hourly_rate() {
    assert!(HourlyRate::new(dec!(0)).is_ok());
    assert!(HourlyRate::new(dec!(85.50)).is_ok());
    assert!(HourlyRate::new(dec!(-0.01)).is_err());
    assert!(HourlyRate::new(dec!(12.3456)).is_ok());
    assert!(HourlyRate::new(dec!(12.34560)).is_ok());
    assert!(HourlyRate::new(dec!(12.34567)).is_err());
    assert!(HourlyRate::new(dec!(9999999999.9999)).is_ok());
    assert!(HourlyRate::new(dec!(10000000000)).is_err());
    assert!(HourlyRate::new(Decimal::MAX).is_err());
  }

  #[test]
  fn test_duration_must_be_positive() {
    assert!(DurationSeconds::new(1).is_ok());
    assert!(DurationSeconds::new(0).is_err());
    assert!(DurationSeconds::new(-60).is_err());
    assert!(DurationSeconds::new(MAX_DURATION_SECONDS).is_ok());
    assert!(DurationSeconds::new(MAX_DURATION_SECONDS + 1).is_err());
    assert!(DurationSeconds::new(i64::MAX).is_err());
  }

  #[test]
  fn test_statuses() {
    assert_eq!(
      ProjectStatus::from_str("Archived").unwrap(),
      ProjectStatus::Archived
    );
    assert_eq!(TodoStatus::from_str("done").unwrap(), TodoStatus::Done);
    assert!(TodoStatus::from_str("blocked").is_err());
    assert_eq!(ProjectStatus::default().as_str(), "active");
  }

  #[test]
  fn test_serde_rejects_invalid_values() {
    let rate: Result<HourlyRate, _> = serde_json::from_str("\"-5\"");
    assert!(rate.is_err());
    let name: Result<ClientName, _> = serde_json::from_str("\"\"");
    assert!(name.is_err());
  }
}
