use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::value_objects::{
  ClientName, CurrencyCode, DurationSeconds, HourlyRate, ProjectName, ProjectStatus, TodoStatus,
  TodoTitle, ValueObjectError,
};

/// Payoneer payout details, stored for the invoice footer and never interpreted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoneerDetails {
  pub account_email: Option<String>,
  pub receiving_account: Option<String>,
  pub memo: Option<String>,
}

/// Bank transfer payout details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankDetails {
  pub account_name: Option<String>,
  pub bank_name: Option<String>,
  #[serde(rename = "accountNumberOrIBAN")]
  pub account_number_or_iban: Option<String>,
  pub swift_bic: Option<String>,
  pub branch: Option<String>,
  pub reference_note: Option<String>,
}

// Client - who gets billed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
  pub id: Uuid,
  pub name: ClientName,
  pub address: String,
  pub email: String,
  pub currency: CurrencyCode,
  pub default_rate: HourlyRate,
  pub terms: String,
  pub payoneer: PayoneerDetails,
  pub bank: BankDetails,
}

impl Client {
  pub fn new(
    id: Option<Uuid>,
    name: ClientName,
    currency: CurrencyCode,
    default_rate: HourlyRate,
  ) -> Self {
    Self {
      id: id.unwrap_or_else(Uuid::new_v4),
      name,
      address: String::new(),
      email: String::new(),
      currency,
      default_rate,
      terms: String::new(),
      payoneer: PayoneerDetails::default(),
      bank: BankDetails::default(),
    }
  }
}

// Project - groups work for a client, optionally at its own rate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
  pub id: Uuid,
  pub client_id: Uuid,
  pub name: ProjectName,
  pub rate_override: Option<HourlyRate>,
  pub status: ProjectStatus,
}

impl Project {
  pub fn new(
    id: Option<Uuid>,
    client_id: Uuid,
    name: ProjectName,
    rate_override: Option<HourlyRate>,
    status: ProjectStatus,
  ) -> Self {
    Self {
      id: id.unwrap_or_else(Uuid::new_v4),
      client_id,
      name,
      rate_override,
      status,
    }
  }

  pub fn belongs_to(&self, client_id: Uuid) -> bool {
    self.client_id == client_id
  }
}

// Todo - a unit of work inside a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
  pub id: Uuid,
  pub project_id: Uuid,
  pub title: TodoTitle,
  pub estimate_minutes: i32,
  pub status: TodoStatus,
}

impl Todo {
  pub fn new(
    id: Option<Uuid>,
    project_id: Uuid,
    title: TodoTitle,
    estimate_minutes: i32,
    status: TodoStatus,
  ) -> Result<Self, ValueObjectError> {
    if estimate_minutes < 0 {
      return Err(ValueObjectError::InvalidEstimate(
        "estimateMinutes cannot be negative".to_string(),
      ));
    }
    Ok(Self {
      id: id.unwrap_or_else(Uuid::new_v4),
      project_id,
      title,
      estimate_minutes,
      status,
    })
  }
}

// TimeEntry - one tracked interval
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntry {
  pub id: Uuid,
  pub todo_id: Option<Uuid>,
  pub client_id: Uuid,
  pub project_id: Uuid,
  pub start_at: DateTime<Utc>,
  pub end_at: DateTime<Utc>,
  pub duration_seconds: i64,
  pub note: String,
  pub billable: bool,
  pub invoiced: bool,
}

/// Fields needed to record a new time entry.
pub struct NewTimeEntry {
  pub id: Option<Uuid>,
  pub todo_id: Option<Uuid>,
  pub client_id: Uuid,
  pub project_id: Uuid,
  pub start_at: DateTime<Utc>,
  pub end_at: DateTime<Utc>,
  pub duration: DurationSeconds,
  pub note: String,
  pub billable: bool,
}

impl TimeEntry {
  /// Builds an un-invoiced entry. The stored duration is the tracker's value and is not
  /// reconciled with the timestamps.
  pub fn new(data: NewTimeEntry) -> Result<Self, ValueObjectError> {
    if data.end_at < data.start_at {
      return Err(ValueObjectError::InvalidTimeRange(
        "endAt must not be before startAt".to_string(),
      ));
    }
    Ok(Self {
      id: data.id.unwrap_or_else(Uuid::new_v4),
      todo_id: data.todo_id,
      client_id: data.client_id,
      project_id: data.project_id,
      start_at: data.start_at,
      end_at: data.end_at,
      duration_seconds: data.duration.value(),
      note: data.note.trim().to_string(),
      billable: data.billable,
      invoiced: false,
    })
  }

  pub fn start_date(&self) -> NaiveDate {
    self.start_at.date_naive()
  }

  pub fn end_date(&self) -> NaiveDate {
    self.end_at.date_naive()
  }

  /// Date-granular range check used by both previews and summaries.
  pub fn falls_within(&self, range: &DateRange) -> bool {
    self.start_date() >= range.start && self.end_date() <= range.end
  }

  /// `HH:MM:SS` of the start timestamp (UTC).
  pub fn start_clock(&self) -> String {
    self.start_at.format("%H:%M:%S").to_string()
  }

  /// `HH:MM:SS` of the end timestamp (UTC).
  pub fn end_clock(&self) -> String {
    self.end_at.format("%H:%M:%S").to_string()
  }
}

/// Inclusive calendar-date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
  pub start: NaiveDate,
  pub end: NaiveDate,
}

impl DateRange {
  pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
    Self { start, end }
  }

  /// Accepts either a plain `YYYY-MM-DD` or a full RFC 3339 timestamp; only the date part is
  /// kept, mirroring `DATE(x)` comparisons.
  pub fn parse(start: &str, end: &str) -> Result<Self, ValueObjectError> {
    Ok(Self::new(parse_date(start)?, parse_date(end)?))
  }
}

pub fn parse_date(value: &str) -> Result<NaiveDate, ValueObjectError> {
  let value = value.trim();
  if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
    return Ok(date);
  }
  DateTime::parse_from_rfc3339(value)
    .map(|dt| dt.with_timezone(&Utc).date_naive())
    .map_err(|_| ValueObjectError::InvalidDate(format!("Unrecognised date '{}'", value)))
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::TimeZone;

  fn entry(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<TimeEntry, ValueObjectError> {
    TimeEntry::new(NewTimeEntry {
      id: None,
      todo_id: None,
      client_id: Uuid::new_v4(),
      project_id: Uuid::new_v4(),
      start_at: start,
      end_at: end,
      duration: DurationSeconds::new(90).unwrap(),
      note: "  standup ".to_string(),
      billable: true,
    })
  }

  #[test]
  fn test_time_entry_starts_uninvoiced() {
    let start = Utc.with_ymd_and_hms(2025, 3, 4, 9, 15, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2025, 3, 4, 9, 16, 30).unwrap();
    let entry = entry(start, end).unwrap();

    assert!(!entry.invoiced);
    assert_eq!(entry.note, "standup");
    assert_eq!(entry.duration_seconds, 90);
    assert_eq!(entry.start_clock(), "09:15:00");
    assert_eq!(entry.end_clock(), "09:16:30");
  }

  #[test]
  fn test_time_entry_rejects_reversed_range() {
    let start = Utc.with_ymd_and_hms(2025, 3, 4, 10, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2025, 3, 4, 9, 0, 0).unwrap();
    assert!(matches!(
      entry(start, end),
      Err(ValueObjectError::InvalidTimeRange(_))
    ));
  }

  #[test]
  fn test_falls_within_uses_dates_only() {
    let start = Utc.with_ymd_and_hms(2025, 3, 31, 23, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2025, 4, 1, 0, 30, 0).unwrap();
    let entry = entry(start, end).unwrap();

    let march = DateRange::parse("2025-03-01", "2025-03-31").unwrap();
    let spanning = DateRange::parse("2025-03-31", "2025-04-01T08:00:00Z").unwrap();
    assert!(!entry.falls_within(&march));
    assert!(entry.falls_within(&spanning));
  }

  #[test]
  fn test_parse_date() {
    assert_eq!(
      parse_date("2025-01-09").unwrap(),
      NaiveDate::from_ymd_opt(2025, 1, 9).unwrap()
    );
    assert_eq!(
      parse_date("2025-01-09T23:30:00-02:00").unwrap(),
      NaiveDate::from_ymd_opt(2025, 1, 10).unwrap()
    );
    assert!(parse_date("09/01/2025").is_err());
  }

  #[test]
  fn test_todo_estimate_must_not_be_negative() {
    let title = TodoTitle::new("Write docs".to_string()).unwrap();
    assert!(Todo::new(None, Uuid::new_v4(), title.clone(), -1, TodoStatus::Open).is_err());
    assert!(Todo::new(None, Uuid::new_v4(), title, 0, TodoStatus::Open).is_ok());
  }
}
