use thiserror::Error;
use uuid::Uuid;

use super::value_objects::ValueObjectError;

#[derive(Debug, Error)]
pub enum TrackingError {
  #[error("Client not found: {0}")]
  ClientNotFound(Uuid),

  #[error("Project not found: {0}")]
  ProjectNotFound(Uuid),

  #[error("To-do not found: {0}")]
  TodoNotFound(Uuid),

  #[error("Project {project_id} does not belong to client {client_id}")]
  ProjectClientMismatch { project_id: Uuid, client_id: Uuid },

  #[error("To-do {todo_id} does not belong to project {project_id}")]
  TodoProjectMismatch { todo_id: Uuid, project_id: Uuid },

  #[error("Validation error: {0}")]
  Validation(#[from] ValueObjectError),

  #[error("Repository error: {0}")]
  Repository(#[from] RepositoryError),
}

/// Storage failures shared by every repository port.
#[derive(Debug, Error)]
pub enum RepositoryError {
  #[error("Database connection failed: {0}")]
  ConnectionFailed(String),

  #[error("Query execution failed: {0}")]
  QueryFailed(String),

  #[error("Transaction failed: {0}")]
  TransactionFailed(String),

  #[error("Record not found")]
  NotFound,

  #[error("Duplicate key violation: {0}")]
  DuplicateKey(String),

  #[error("Write conflict: {0}")]
  Conflict(String),

  #[error("Stored data is invalid: {0}")]
  Corrupt(String),

  #[error("Database error: {0}")]
  DatabaseError(String),
}

impl From<sqlx::Error> for RepositoryError {
  fn from(error: sqlx::Error) -> Self {
    match error {
      sqlx::Error::RowNotFound => RepositoryError::NotFound,
      sqlx::Error::Database(db_err) => {
        if db_err.is_unique_violation() {
          RepositoryError::DuplicateKey(
            db_err
              .constraint()
              .map(str::to_string)
              .unwrap_or_else(|| db_err.message().to_string()),
          )
        } else {
          RepositoryError::DatabaseError(db_err.message().to_string())
        }
      }
      sqlx::Error::PoolTimedOut => RepositoryError::ConnectionFailed("Pool timed out".to_string()),
      sqlx::Error::PoolClosed => RepositoryError::ConnectionFailed("Pool closed".to_string()),
      _ => RepositoryError::QueryFailed(error.to_string()),
    }
  }
}

impl From<ValueObjectError> for RepositoryError {
  fn from(error: ValueObjectError) -> Self {
    RepositoryError::Corrupt(error.to_string())
  }
}
