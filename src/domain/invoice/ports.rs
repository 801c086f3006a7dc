use async_trait::async_trait;
use uuid::Uuid;

use super::entities::{Invoice, InvoiceLine};
use super::value_objects::InvoiceStatus;
use crate::domain::tracking::errors::RepositoryError;

#[async_trait]
pub trait InvoiceRepository: Send + Sync {
  /// Persists the invoice, its lines and flips `invoiced` on every referenced time entry as one
  /// unit. The flip only succeeds for entries of the invoice's client that are not yet invoiced;
  /// otherwise nothing is written and `RepositoryError::Conflict` is returned.
  async fn create_with_lines(
    &self,
    invoice: Invoice,
    lines: Vec<InvoiceLine>,
  ) -> Result<Invoice, RepositoryError>;

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Invoice>, RepositoryError>;
  async fn find_lines(&self, invoice_id: Uuid) -> Result<Vec<InvoiceLine>, RepositoryError>;

  /// Newest issue date first, then highest number.
  async fn find_all(&self) -> Result<Vec<Invoice>, RepositoryError>;

  /// Returns `false` when no invoice has this id.
  async fn update_status(&self, id: Uuid, status: &InvoiceStatus)
  -> Result<bool, RepositoryError>;

  /// Clears `invoiced` on the referenced entries, then removes lines and invoice, atomically.
  /// Returns the released entry ids, or `None` when the invoice does not exist.
  async fn delete_with_lines(&self, id: Uuid) -> Result<Option<Vec<Uuid>>, RepositoryError>;
}

#[async_trait]
pub trait CounterRepository: Send + Sync {
  /// Atomically returns the current value of `key` (starting at `seed`) and stores value + 1.
  async fn next_value(&self, key: &str, seed: i64) -> Result<i64, RepositoryError>;
}
