use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use std::collections::HashSet;
use uuid::Uuid;

use crate::domain::invoice::{
  Invoice, InvoiceLine, InvoiceNumber, InvoiceStatus, ports::InvoiceRepository,
};
use crate::domain::tracking::{CurrencyCode, RepositoryError};

#[derive(Debug, FromRow)]
struct InvoiceRow {
  id: Uuid,
  client_id: Uuid,
  number: i64,
  issue_date: NaiveDate,
  due_date: NaiveDate,
  currency: String,
  status: String,
  hours_seconds: i64,
  subtotal: Decimal,
  tax: Decimal,
  discount: Decimal,
  grand_total: Decimal,
  pdf_path: Option<String>,
  created_at: DateTime<Utc>,
}

impl TryFrom<InvoiceRow> for Invoice {
  type Error = RepositoryError;

  fn try_from(row: InvoiceRow) -> Result<Self, Self::Error> {
    Ok(Invoice {
      id: row.id,
      client_id: row.client_id,
      number: InvoiceNumber::new(row.number)?,
      issue_date: row.issue_date,
      due_date: row.due_date,
      currency: CurrencyCode::new(&row.currency)?,
      status: InvoiceStatus::new(row.status)?,
      hours_seconds: row.hours_seconds,
      subtotal: row.subtotal,
      tax: row.tax,
      discount: row.discount,
      grand_total: row.grand_total,
      pdf_path: row.pdf_path,
      created_at: row.created_at,
    })
  }
}

#[derive(Debug, FromRow)]
struct InvoiceLineRow {
  id: Uuid,
  invoice_id: Uuid,
  time_entry_id: Option<Uuid>,
  date: NaiveDate,
  description: String,
  hours_seconds: i64,
  rate: Decimal,
  amount: Decimal,
  project_name: String,
  start_clock: String,
  end_clock: String,
}

impl From<InvoiceLineRow> for InvoiceLine {
  fn from(row: InvoiceLineRow) -> Self {
    InvoiceLine {
      id: row.id,
      invoice_id: row.invoice_id,
      time_entry_id: row.time_entry_id,
      date: row.date,
      description: row.description,
      hours_seconds: row.hours_seconds,
      rate: row.rate,
      amount: row.amount,
      project_name: row.project_name,
      start: row.start_clock,
      end: row.end_clock,
    }
  }
}

pub struct PostgresInvoiceRepository {
  pool: PgPool,
}

impl PostgresInvoiceRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl InvoiceRepository for PostgresInvoiceRepository {
  async fn create_with_lines(
    &self,
    invoice: Invoice,
    lines: Vec<InvoiceLine>,
  ) -> Result<Invoice, RepositoryError> {
    let mut tx = self.pool.begin().await?;

    let row = sqlx::query_as::<_, InvoiceRow>(
      r#"
            INSERT INTO invoices (
                id, client_id, number, issue_date, due_date, currency, status,
                hours_seconds, subtotal, tax, discount, grand_total, pdf_path, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING id, client_id, number, issue_date, due_date, currency, status,
                      hours_seconds, subtotal, tax, discount, grand_total, pdf_path, created_at
            "#,
    )
    .bind(invoice.id)
    .bind(invoice.client_id)
    .bind(invoice.number.value())
    .bind(invoice.issue_date)
    .bind(invoice.due_date)
    .bind(invoice.currency.as_str())
    .bind(invoice.status.as_str())
    .bind(invoice.hours_seconds)
    .bind(invoice.subtotal)
    .bind(invoice.tax)
    .bind(invoice.discount)
    .bind(invoice.grand_total)
    .bind(&invoice.pdf_path)
    .bind(invoice.created_at)
    .fetch_one(&mut *tx)
    .await?;

    // Compare-and-set: every referenced entry must belong to the client and still be free.
    let entry_ids: Vec<Uuid> = lines
      .iter()
      .filter_map(|l| l.time_entry_id)
      .collect::<HashSet<_>>()
      .into_iter()
      .collect();
    if !entry_ids.is_empty() {
      let result = sqlx::query(
        r#"
            UPDATE time_entries
            SET invoiced = TRUE
            WHERE id = ANY($1) AND client_id = $2 AND invoiced = FALSE
            "#,
      )
      .bind(&entry_ids)
      .bind(invoice.client_id)
      .execute(&mut *tx)
      .await?;

      if result.rows_affected() != entry_ids.len() as u64 {
        tx.rollback().await?;
        return Err(RepositoryError::Conflict(format!(
          "{} of {} time entries could not be invoiced",
          entry_ids.len() as u64 - result.rows_affected(),
          entry_ids.len()
        )));
      }
    }

    for (position, line) in lines.iter().enumerate() {
      sqlx::query(
        r#"
            INSERT INTO invoice_lines (
                id, invoice_id, time_entry_id, date, description, hours_seconds,
                rate, amount, project_name, start_clock, end_clock, position
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
      )
      .bind(line.id)
      .bind(line.invoice_id)
      .bind(line.time_entry_id)
      .bind(line.date)
      .bind(&line.description)
      .bind(line.hours_seconds)
      .bind(line.rate)
      .bind(line.amount)
      .bind(&line.project_name)
      .bind(&line.start)
      .bind(&line.end)
      .bind(position as i32)
      .execute(&mut *tx)
      .await?;
    }

    tx.commit().await?;
    row.try_into()
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Invoice>, RepositoryError> {
    let row = sqlx::query_as::<_, InvoiceRow>(
      r#"
            SELECT id, client_id, number, issue_date, due_date, currency, status,
                   hours_seconds, subtotal, tax, discount, grand_total, pdf_path, created_at
            FROM invoices
            WHERE id = $1
            "#,
    )
    .bind(id)
    .fetch_optional(&self.pool)
    .await?;

    row.map(|r| r.try_into()).transpose()
  }

  async fn find_lines(&self, invoice_id: Uuid) -> Result<Vec<InvoiceLine>, RepositoryError> {
    let rows = sqlx::query_as::<_, InvoiceLineRow>(
      r#"
            SELECT id, invoice_id, time_entry_id, date, description, hours_seconds,
                   rate, amount, project_name, start_clock, end_clock
            FROM invoice_lines
            WHERE invoice_id = $1
            ORDER BY position ASC
            "#,
    )
    .bind(invoice_id)
    .fetch_all(&self.pool)
    .await?;

    Ok(rows.into_iter().map(Into::into).collect())
  }

  async fn find_all(&self) -> Result<Vec<Invoice>, RepositoryError> {
    let rows = sqlx::query_as::<_, InvoiceRow>(
      r#"
            SELECT id, client_id, number, issue_date, due_date, currency, status,
                   hours_seconds, subtotal, tax, discount, grand_total, pdf_path, created_at
            FROM invoices
            ORDER BY issue_date DESC, number DESC
            "#,
    )
    .fetch_all(&self.pool)
    .await?;

    rows.into_iter().map(|r| r.try_into()).collect()
  }

  async fn update_status(
    &self,
    id: Uuid,
    status: &InvoiceStatus,
  ) -> Result<bool, RepositoryError> {
    let result = sqlx::query("UPDATE invoices SET status = $2 WHERE id = $1")
      .bind(id)
      .bind(status.as_str())
      .execute(&self.pool)
      .await?;

    Ok(result.rows_affected() > 0)
  }

  async fn delete_with_lines(&self, id: Uuid) -> Result<Option<Vec<Uuid>>, RepositoryError> {
    let mut tx = self.pool.begin().await?;

    let locked: Option<Uuid> =
      sqlx::query_scalar("SELECT id FROM invoices WHERE id = $1 FOR UPDATE")
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;
    if locked.is_none() {
      tx.rollback().await?;
      return Ok(None);
    }

    let released: Vec<Uuid> = sqlx::query_scalar(
      r#"
            SELECT time_entry_id
            FROM invoice_lines
            WHERE invoice_id = $1 AND time_entry_id IS NOT NULL
            ORDER BY position ASC
            "#,
    )
    .bind(id)
    .fetch_all(&mut *tx)
    .await?;

    // Flags are cleared before rows go away.
    sqlx::query("UPDATE time_entries SET invoiced = FALSE WHERE id = ANY($1)")
      .bind(&released)
      .execute(&mut *tx)
      .await?;

    sqlx::query("DELETE FROM invoice_lines WHERE invoice_id = $1")
      .bind(id)
      .execute(&mut *tx)
      .await?;

    sqlx::query("DELETE FROM invoices WHERE id = $1")
      .bind(id)
      .execute(&mut *tx)
      .await?;

    tx.commit().await?;
    Ok(Some(released))
  }
}
