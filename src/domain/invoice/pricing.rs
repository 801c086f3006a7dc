//! Billing arithmetic shared by previews, manual lines, exports and metrics.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::tracking::entities::{Client, Project};
use crate::domain::tracking::value_objects::{MAX_DURATION_SECONDS, ValueObjectError};

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 3600;
const MONEY_SCALE: u32 = 2;

/// Effective hourly rate: a project override wins (even when zero), then the client's default,
/// then zero. Never fails so rollups over orphaned rows still produce a number.
pub fn effective_rate(project: Option<&Project>, client: Option<&Client>) -> Decimal {
  if let Some(rate) = project.and_then(|p| p.rate_override) {
    return rate.value();
  }
  client
    .map(|c| c.default_rate.value())
    .unwrap_or(Decimal::ZERO)
}

/// Rounds raw seconds to the nearest whole minute (half up), clamping negatives to zero.
pub fn normalize_seconds(raw: i64) -> i64 {
  let raw = raw.max(0);
  let minutes =
    raw / SECONDS_PER_MINUTE + i64::from(raw % SECONDS_PER_MINUTE >= SECONDS_PER_MINUTE / 2);
  minutes
    .checked_mul(SECONDS_PER_MINUTE)
    .unwrap_or(i64::MAX - i64::MAX % SECONDS_PER_MINUTE)
}

/// Canonical money rounding: two places, half away from zero. The result always carries a
/// scale of two so `160` renders as `160.00`.
pub fn round_money(amount: Decimal) -> Decimal {
  let mut rounded =
    amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
  rounded.rescale(MONEY_SCALE);
  rounded
}

/// Unrounded `seconds / 3600 * rate`.
pub fn raw_amount(seconds: i64, rate: Decimal) -> Result<Decimal, ValueObjectError> {
  Decimal::from(seconds)
    .checked_mul(rate)
    .and_then(|value| value.checked_div(Decimal::from(SECONDS_PER_HOUR)))
    .ok_or_else(|| {
      ValueObjectError::AmountOutOfRange(format!("{} seconds at rate {}", seconds, rate))
    })
}

/// Amount of one invoice line: rounded per line.
pub fn line_amount(seconds: i64, rate: Decimal) -> Result<Decimal, ValueObjectError> {
  raw_amount(seconds, rate).map(round_money)
}

/// Converts decimal hours into normalized seconds, bounded like a tracked duration.
pub fn hours_to_seconds(hours: Decimal) -> Result<i64, ValueObjectError> {
  let out_of_range = || ValueObjectError::InvalidHours(format!("{} hours is out of range", hours));
  let seconds = hours
    .checked_mul(Decimal::from(SECONDS_PER_HOUR))
    .ok_or_else(out_of_range)?
    .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
    .to_i64()
    .filter(|seconds| (0..=MAX_DURATION_SECONDS).contains(seconds))
    .ok_or_else(out_of_range)?;
  Ok(normalize_seconds(seconds))
}

/// `HH:MM` rendering of a duration, used by the CSV export.
pub fn format_hours_minutes(seconds: i64) -> String {
  let seconds = seconds.max(0);
  format!(
    "{:02}:{:02}",
    seconds / SECONDS_PER_HOUR,
    (seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE
  )
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::tracking::value_objects::{
    ClientName, CurrencyCode, HourlyRate, ProjectName, ProjectStatus,
  };
  use rust_decimal_macros::dec;
  use uuid::Uuid;

  fn client(rate: Decimal) -> Client {
    Client::new(
      None,
      ClientName::new("Acme".to_string()).unwrap(),
      CurrencyCode::usd(),
      HourlyRate::new(rate).unwrap(),
    )
  }

  fn project(client_id: Uuid, rate_override: Option<Decimal>) -> Project {
    Project::new(
      None,
      client_id,
      ProjectName::new("Site".to_string()).unwrap(),
      rate_override.map(|r| HourlyRate::new(r).unwrap()),
      ProjectStatus::Active,
    )
  }

  #[test]
  fn test_rate_precedence() {
    let c = client(dec!(50));
    let plain = project(c.id, None);
    let custom = project(c.id, Some(dec!(80)));
    let free = project(c.id, Some(dec!(0)));

    assert_eq!(effective_rate(Some(&custom), Some(&c)), dec!(80));
    assert_eq!(effective_rate(Some(&free), Some(&c)), dec!(0));
    assert_eq!(effective_rate(Some(&plain), Some(&c)), dec!(50));
    assert_eq!(effective_rate(None, Some(&c)), dec!(50));
    assert_eq!(effective_rate(Some(&custom), None), dec!(80));
    assert_eq!(effective_rate(None, None), dec!(0));
  }

  #[test]
  fn test_normalize_to_whole_minutes() {
    assert_eq!(normalize_seconds(0), 0);
    assert_eq!(normalize_seconds(-45), 0);
    assert_eq!(normalize_seconds(29), 0);
    assert_eq!(normalize_seconds(30), 60);
    assert_eq!(normalize_seconds(37), 60);
    assert_eq!(normalize_seconds(89), 60);
    assert_eq!(normalize_seconds(90), 120);
    assert_eq!(normalize_seconds(3661), 3660);
    assert_eq!(normalize_seconds(i64::MAX), i64::MAX - i64::MAX % 60);
    assert_eq!(normalize_seconds(i64::MAX - 8), i64::MAX - i64::MAX % 60);

    for raw in 0..7200 {
      let normalized = normalize_seconds(raw);
      assert_eq!(normalized % 60, 0);
      let expected = (Decimal::from(raw) / dec!(60))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        * dec!(60);
      assert_eq!(Decimal::from(normalized), expected);
    }
  }

  #[test]
  fn test_line_amount_rounds_per_line() {
    assert_eq!(line_amount(3660, dec!(50)).unwrap(), dec!(50.83));
    assert_eq!(line_amount(3660, dec!(0)).unwrap(), dec!(0));
    assert_eq!(round_money(dec!(10.555)), dec!(10.56));
    assert_eq!(round_money(dec!(-10.555)), dec!(-10.56));
    assert_eq!(round_money(dec!(160)).to_string(), "160.00");
    assert_eq!(round_money(Decimal::ZERO).to_string(), "0.00");
  }

  #[test]
  fn test_amount_overflow_is_an_error() {
    assert!(matches!(
      raw_amount(36000, Decimal::MAX),
      Err(ValueObjectError::AmountOutOfRange(_))
    ));
    assert!(line_amount(i64::MAX, Decimal::MAX).is_err());
  }

  #[test]
  fn test_hours_to_seconds() {
    assert_eq!(hours_to_seconds(dec!(1.5)).unwrap(), 5400);
    assert_eq!(hours_to_seconds(dec!(0.01)).unwrap(), 60);
    assert_eq!(hours_to_seconds(dec!(0.008)).unwrap(), 0);
    assert_eq!(hours_to_seconds(dec!(8784)).unwrap(), MAX_DURATION_SECONDS);
    assert!(hours_to_seconds(dec!(8784.01)).is_err());
    assert!(hours_to_seconds(Decimal::MAX).is_err());
  }

  #[test]
  fn test_format_hours_minutes() {
    assert_eq!(format_hours_minutes(3660), "01:01");
    assert_eq!(format_hours_minutes(0), "00:00");
    assert_eq!(format_hours_minutes(36000 + 59 * 60), "10:59");
  }
}
