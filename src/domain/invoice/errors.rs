use thiserror::Error;
use uuid::Uuid;

use crate::domain::tracking::errors::RepositoryError;
use crate::domain::tracking::value_objects::ValueObjectError;

#[derive(Debug, Error)]
pub enum InvoiceError {
  #[error("Validation error: {0}")]
  Validation(#[from] ValueObjectError),

  #[error("Client not found: {0}")]
  ClientNotFound(Uuid),

  #[error("Invoice not found: {0}")]
  InvoiceNotFound(Uuid),

  #[error("Invoice line {0} does not exist")]
  LineNotFound(usize),

  #[error("Time entry {0} appears on more than one line")]
  DuplicateTimeEntry(Uuid),

  #[error("Time entries are already invoiced or belong to another client")]
  TimeEntriesUnavailable,

  #[error("Invoice number {0} already exists")]
  InvoiceNumberAlreadyExists(i64),

  #[error("Repository error: {0}")]
  Repository(#[from] RepositoryError),
}
