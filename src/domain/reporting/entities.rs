use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryTotals {
  pub total_seconds: i64,
  pub billable_seconds: i64,
}

impl SummaryTotals {
  /// Saturates instead of overflowing.
  pub fn add(&mut self, seconds: i64, billable: bool) {
    self.total_seconds = self.total_seconds.saturating_add(seconds);
    if billable {
      self.billable_seconds = self.billable_seconds.saturating_add(seconds);
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientSummary {
  pub client_id: Uuid,
  pub client_name: String,
  pub total_seconds: i64,
  pub billable_seconds: i64,
}

/// Raw tracked time inside a date range, overall and per client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeSummary {
  pub totals: SummaryTotals,
  pub by_client: Vec<ClientSummary>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_totals_saturate() {
    let mut totals = SummaryTotals::default();
    totals.add(i64::MAX, true);
    totals.add(i64::MAX, false);
    assert_eq!(totals.total_seconds, i64::MAX);
    assert_eq!(totals.billable_seconds, i64::MAX);
  }
}
