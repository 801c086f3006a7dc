use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::domain::tracking::{DateRange, RepositoryError, TimeEntry, TimeEntryRepository};

const TIME_ENTRY_COLUMNS: &str = "id, todo_id, client_id, project_id, start_at, end_at, \
   duration_seconds, note, billable, invoiced";

#[derive(Debug, FromRow)]
struct TimeEntryRow {
  id: Uuid,
  todo_id: Option<Uuid>,
  client_id: Uuid,
  project_id: Uuid,
  start_at: DateTime<Utc>,
  end_at: DateTime<Utc>,
  duration_seconds: i64,
  note: String,
  billable: bool,
  invoiced: bool,
}

impl From<TimeEntryRow> for TimeEntry {
  fn from(row: TimeEntryRow) -> Self {
    TimeEntry {
      id: row.id,
      todo_id: row.todo_id,
      client_id: row.client_id,
      project_id: row.project_id,
      start_at: row.start_at,
      end_at: row.end_at,
      duration_seconds: row.duration_seconds,
      note: row.note,
      billable: row.billable,
      invoiced: row.invoiced,
    }
  }
}

pub struct PostgresTimeEntryRepository {
  pool: PgPool,
}

impl PostgresTimeEntryRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl TimeEntryRepository for PostgresTimeEntryRepository {
  async fn create(&self, entry: TimeEntry) -> Result<TimeEntry, RepositoryError> {
    let row = sqlx::query_as::<_, TimeEntryRow>(&format!(
      r#"
            INSERT INTO time_entries ({TIME_ENTRY_COLUMNS})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {TIME_ENTRY_COLUMNS}
            "#
    ))
    .bind(entry.id)
    .bind(entry.todo_id)
    .bind(entry.client_id)
    .bind(entry.project_id)
    .bind(entry.start_at)
    .bind(entry.end_at)
    .bind(entry.duration_seconds)
    .bind(&entry.note)
    .bind(entry.billable)
    .bind(entry.invoiced)
    .fetch_one(&self.pool)
    .await?;

    Ok(row.into())
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<TimeEntry>, RepositoryError> {
    let row = sqlx::query_as::<_, TimeEntryRow>(&format!(
      "SELECT {TIME_ENTRY_COLUMNS} FROM time_entries WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(&self.pool)
    .await?;

    Ok(row.map(Into::into))
  }

  async fn find_uninvoiced_for_client(
    &self,
    client_id: Uuid,
    range: DateRange,
    project_id: Option<Uuid>,
  ) -> Result<Vec<TimeEntry>, RepositoryError> {
    let rows = sqlx::query_as::<_, TimeEntryRow>(&format!(
      r#"
            SELECT {TIME_ENTRY_COLUMNS}
            FROM time_entries
            WHERE client_id = $1
              AND invoiced = FALSE
              AND (start_at AT TIME ZONE 'UTC')::date >= $2
              AND (end_at AT TIME ZONE 'UTC')::date <= $3
              AND ($4::uuid IS NULL OR project_id = $4)
            ORDER BY start_at ASC, id ASC
            "#
    ))
    .bind(client_id)
    .bind(range.start)
    .bind(range.end)
    .bind(project_id)
    .fetch_all(&self.pool)
    .await?;

    Ok(rows.into_iter().map(Into::into).collect())
  }

  async fn find_in_range(&self, range: DateRange) -> Result<Vec<TimeEntry>, RepositoryError> {
    let rows = sqlx::query_as::<_, TimeEntryRow>(&format!(
      r#"
            SELECT {TIME_ENTRY_COLUMNS}
            FROM time_entries
            WHERE (start_at AT TIME ZONE 'UTC')::date >= $1
              AND (end_at AT TIME ZONE 'UTC')::date <= $2
            ORDER BY start_at ASC, id ASC
            "#
    ))
    .bind(range.start)
    .bind(range.end)
    .fetch_all(&self.pool)
    .await?;

    Ok(rows.into_iter().map(Into::into).collect())
  }

  async fn find_uninvoiced_billable(&self) -> Result<Vec<TimeEntry>, RepositoryError> {
    let rows = sqlx::query_as::<_, TimeEntryRow>(&format!(
      "SELECT {TIME_ENTRY_COLUMNS} FROM time_entries WHERE invoiced = FALSE AND billable = TRUE"
    ))
    .fetch_all(&self.pool)
    .await?;

    Ok(rows.into_iter().map(Into::into).collect())
  }

  async fn find_recent(&self, limit: u32) -> Result<Vec<TimeEntry>, RepositoryError> {
    let rows = sqlx::query_as::<_, TimeEntryRow>(&format!(
      r#"
            SELECT {TIME_ENTRY_COLUMNS}
            FROM time_entries
            ORDER BY start_at DESC, id DESC
            LIMIT $1
            "#
    ))
    .bind(i64::from(limit))
    .fetch_all(&self.pool)
    .await?;

    Ok(rows.into_iter().map(Into::into).collect())
  }

  async fn mark_invoiced(&self, ids: &[Uuid]) -> Result<u64, RepositoryError> {
    let mut tx = self.pool.begin().await?;

    let result = sqlx::query(
      r#"
            UPDATE time_entries
            SET invoiced = TRUE
            WHERE id = ANY($1) AND invoiced = FALSE
            "#,
    )
    .bind(ids)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(result.rows_affected())
  }
}
