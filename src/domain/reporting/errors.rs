use thiserror::Error;

use crate::domain::tracking::errors::RepositoryError;
use crate::domain::tracking::value_objects::ValueObjectError;

#[derive(Debug, Error)]
pub enum ReportingError {
  #[error("Validation error: {0}")]
  Validation(#[from] ValueObjectError),

  #[error("Export failed: {0}")]
  Export(String),

  #[error("Repository error: {0}")]
  Repository(#[from] RepositoryError),
}

impl From<csv::Error> for ReportingError {
  fn from(error: csv::Error) -> Self {
    ReportingError::Export(error.to_string())
  }
}
