use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Request for building an invoice preview
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PreviewInvoiceRequest {
  pub client_id: Uuid,

  /// First day of the range (`YYYY-MM-DD` or RFC 3339)
  #[validate(length(min = 1, message = "Start date is required"))]
  pub start: String,

  /// Last day of the range, inclusive
  #[validate(length(min = 1, message = "End date is required"))]
  pub end: String,

  /// Restricts the preview to one project
  pub project_id: Option<Uuid>,
}

/// Request for the per-client time summary
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SummaryRangeRequest {
  #[validate(length(min = 1, message = "Start date is required"))]
  pub start: String,

  #[validate(length(min = 1, message = "End date is required"))]
  pub end: String,
}

/// Request for changing an invoice's status label
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChangeInvoiceStatusRequest {
  #[validate(length(
    min = 1,
    max = 32,
    message = "Status must be between 1 and 32 characters"
  ))]
  pub status: String,
}

/// Request for flagging time entries as invoiced without an invoice
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MarkEntriesInvoicedRequest {
  #[validate(length(min = 1, message = "At least one time entry id is required"))]
  pub ids: Vec<Uuid>,
}

/// `?limit=` query for recent entries and the CSV export
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct LimitQuery {
  #[validate(range(min = 1, max = 1000, message = "Limit must be between 1 and 1000"))]
  pub limit: Option<u32>,
}

/// Liveness probe response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
  pub status: &'static str,
}

/// Standard error response
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
  /// Error type/code
  pub error: String,

  /// Human-readable error message
  pub message: String,

  /// Optional detailed error information
  #[serde(skip_serializing_if = "Option::is_none")]
  pub details: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_preview_request_uses_camel_case() {
    let client_id = Uuid::new_v4();
    let request: PreviewInvoiceRequest = serde_json::from_value(serde_json::json!({
      "clientId": client_id,
      "start": "2025-01-01",
      "end": "2025-01-31",
    }))
    .unwrap();

    assert_eq!(request.client_id, client_id);
    assert!(request.project_id.is_none());
    assert!(request.validate().is_ok());
  }

  #[test]
  fn test_empty_dates_rejected() {
    let request = SummaryRangeRequest {
      start: String::new(),
      end: "2025-01-31".to_string(),
    };
    assert!(request.validate().is_err());
  }

  #[test]
  fn test_limit_bounds() {
    assert!(LimitQuery { limit: None }.validate().is_ok());
    assert!(LimitQuery { limit: Some(1000) }.validate().is_ok());
    assert!(LimitQuery { limit: Some(0) }.validate().is_err());
    assert!(LimitQuery { limit: Some(1001) }.validate().is_err());
  }

  #[test]
  fn test_mark_invoiced_requires_ids() {
    let request = MarkEntriesInvoicedRequest { ids: vec![] };
    assert!(request.validate().is_err());
  }
}
