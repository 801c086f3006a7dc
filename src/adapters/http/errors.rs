use actix_web::{
  HttpResponse,
  error::ResponseError,
  http::{StatusCode, header::ContentType},
};
use serde::Serialize;
use std::fmt;

use crate::domain::invoice::InvoiceError;
use crate::domain::reporting::ReportingError;
use crate::domain::tracking::{RepositoryError, TrackingError};

use super::dtos::ErrorResponse;

/// API error type that maps domain errors to HTTP responses
#[derive(Debug, Serialize)]
#[serde(tag = "type", content = "details")]
pub enum ApiError {
  /// Malformed or invalid input (400 Bad Request)
  Validation(String),

  /// Referenced record does not exist (404 Not Found)
  NotFound(String),

  /// Records exist but do not belong together (422 Unprocessable Entity)
  Mismatch(String),

  /// Write refused because of the current state (409 Conflict)
  Conflict(String),

  /// Internal server error (500 Internal Server Error)
  Internal(String),
}

impl fmt::Display for ApiError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ApiError::Validation(msg) => write!(f, "Validation error: {}", msg),
      ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
      ApiError::Mismatch(msg) => write!(f, "Mismatch: {}", msg),
      ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
      ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
    }
  }
}

impl ResponseError for ApiError {
  fn status_code(&self) -> StatusCode {
    match self {
      ApiError::Validation(_) => StatusCode::BAD_REQUEST,
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::Mismatch(_) => StatusCode::UNPROCESSABLE_ENTITY,
      ApiError::Conflict(_) => StatusCode::CONFLICT,
      ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    let (error_type, message) = match self {
      ApiError::Validation(msg) => ("validation_error", msg.clone()),
      ApiError::NotFound(msg) => ("not_found", msg.clone()),
      ApiError::Mismatch(msg) => ("mismatch", msg.clone()),
      ApiError::Conflict(msg) => ("conflict", msg.clone()),
      ApiError::Internal(msg) => {
        // Details stay in the log
        tracing::error!("Internal error: {}", msg);
        (
          "internal_error",
          "An internal server error occurred".to_string(),
        )
      }
    };

    let error_response = ErrorResponse {
      error: error_type.to_string(),
      message,
      details: None,
    };

    HttpResponse::build(status)
      .content_type(ContentType::json())
      .json(error_response)
  }
}

impl From<RepositoryError> for ApiError {
  fn from(error: RepositoryError) -> Self {
    match error {
      RepositoryError::NotFound => ApiError::NotFound("Record not found".to_string()),
      RepositoryError::DuplicateKey(_) | RepositoryError::Conflict(_) => {
        ApiError::Conflict(error.to_string())
      }
      _ => ApiError::Internal(error.to_string()),
    }
  }
}

impl From<TrackingError> for ApiError {
  fn from(error: TrackingError) -> Self {
    match error {
      TrackingError::ClientNotFound(_)
      | TrackingError::ProjectNotFound(_)
      | TrackingError::TodoNotFound(_) => ApiError::NotFound(error.to_string()),
      TrackingError::ProjectClientMismatch { .. } | TrackingError::TodoProjectMismatch { .. } => {
        ApiError::Mismatch(error.to_string())
      }
      TrackingError::Validation(e) => ApiError::Validation(e.to_string()),
      TrackingError::Repository(e) => e.into(),
    }
  }
}

impl From<InvoiceError> for ApiError {
  fn from(error: InvoiceError) -> Self {
    match error {
      InvoiceError::Validation(e) => ApiError::Validation(e.to_string()),
      InvoiceError::ClientNotFound(_) | InvoiceError::InvoiceNotFound(_) => {
        ApiError::NotFound(error.to_string())
      }
      InvoiceError::LineNotFound(_) | InvoiceError::DuplicateTimeEntry(_) => {
        ApiError::Validation(error.to_string())
      }
      InvoiceError::TimeEntriesUnavailable | InvoiceError::InvoiceNumberAlreadyExists(_) => {
        ApiError::Conflict(error.to_string())
      }
      InvoiceError::Repository(e) => e.into(),
    }
  }
}

impl From<ReportingError> for ApiError {
  fn from(error: ReportingError) -> Self {
    match error {
      ReportingError::Validation(e) => ApiError::Validation(e.to_string()),
      ReportingError::Export(msg) => ApiError::Internal(format!("CSV export failed: {}", msg)),
      ReportingError::Repository(e) => e.into(),
    }
  }
}

/// Convert validation errors from validator crate
impl From<validator::ValidationErrors> for ApiError {
  fn from(errors: validator::ValidationErrors) -> Self {
    let mut messages: Vec<String> = errors
      .field_errors()
      .iter()
      .flat_map(|(field, errors)| {
        errors
          .iter()
          .map(|error| {
            error
              .message
              .as_ref()
              .map(|m| m.to_string())
              .unwrap_or_else(|| format!("Invalid field: {}", field))
          })
          .collect::<Vec<_>>()
      })
      .collect();
    messages.sort();

    ApiError::Validation(messages.join(", "))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::tracking::ValueObjectError;
  use uuid::Uuid;

  #[test]
  fn test_api_error_status_codes() {
    assert_eq!(
      ApiError::Validation("test".to_string()).status_code(),
      StatusCode::BAD_REQUEST
    );
    assert_eq!(
      ApiError::NotFound("test".to_string()).status_code(),
      StatusCode::NOT_FOUND
    );
    assert_eq!(
      ApiError::Mismatch("test".to_string()).status_code(),
      StatusCode::UNPROCESSABLE_ENTITY
    );
    assert_eq!(
      ApiError::Conflict("test".to_string()).status_code(),
      StatusCode::CONFLICT
    );
    assert_eq!(
      ApiError::Internal("test".to_string()).status_code(),
      StatusCode::INTERNAL_SERVER_ERROR
    );
  }

  #[test]
  fn test_tracking_error_conversion() {
    let api_error: ApiError = TrackingError::ClientNotFound(Uuid::new_v4()).into();
    assert_eq!(api_error.status_code(), StatusCode::NOT_FOUND);

    let api_error: ApiError = TrackingError::ProjectClientMismatch {
      project_id: Uuid::new_v4(),
      client_id: Uuid::new_v4(),
    }
    .into();
    assert_eq!(api_error.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

    let api_error: ApiError =
      TrackingError::Validation(ValueObjectError::InvalidDuration("0".to_string())).into();
    assert_eq!(api_error.status_code(), StatusCode::BAD_REQUEST);
  }

  #[test]
  fn test_invoice_error_conversion() {
    let api_error: ApiError = InvoiceError::TimeEntriesUnavailable.into();
    assert_eq!(api_error.status_code(), StatusCode::CONFLICT);

    let api_error: ApiError = InvoiceError::InvoiceNumberAlreadyExists(1001).into();
    assert_eq!(api_error.status_code(), StatusCode::CONFLICT);

    let api_error: ApiError = InvoiceError::InvoiceNotFound(Uuid::new_v4()).into();
    assert_eq!(api_error.status_code(), StatusCode::NOT_FOUND);

    let api_error: ApiError =
      InvoiceError::Repository(RepositoryError::QueryFailed("boom".to_string())).into();
    assert_eq!(api_error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
  }

  #[test]
  fn test_internal_error_hides_details() {
    let response = ApiError::Internal("password=secret".to_string()).error_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
  }
}
