use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::tracking::{RepositoryError, Todo, TodoRepository, TodoStatus, TodoTitle};

#[derive(Debug, FromRow)]
struct TodoRow {
  id: Uuid,
  project_id: Uuid,
  title: String,
  estimate_minutes: i32,
  status: String,
}

impl TryFrom<TodoRow> for Todo {
  type Error = RepositoryError;

  fn try_from(row: TodoRow) -> Result<Self, Self::Error> {
    Ok(Todo::new(
      Some(row.id),
      row.project_id,
      TodoTitle::new(row.title)?,
      row.estimate_minutes,
      TodoStatus::from_str(&row.status)?,
    )?)
  }
}

pub struct PostgresTodoRepository {
  pool: PgPool,
}

impl PostgresTodoRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl TodoRepository for PostgresTodoRepository {
  async fn create(&self, todo: Todo) -> Result<Todo, RepositoryError> {
    let row = sqlx::query_as::<_, TodoRow>(
      r#"
            INSERT INTO todos (id, project_id, title, estimate_minutes, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, project_id, title, estimate_minutes, status
            "#,
    )
    .bind(todo.id)
    .bind(todo.project_id)
    .bind(todo.title.value())
    .bind(todo.estimate_minutes)
    .bind(todo.status.as_str())
    .fetch_one(&self.pool)
    .await?;

    row.try_into()
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Todo>, RepositoryError> {
    let row = sqlx::query_as::<_, TodoRow>(
      r#"
            SELECT id, project_id, title, estimate_minutes, status
            FROM todos
            WHERE id = $1
            "#,
    )
    .bind(id)
    .fetch_optional(&self.pool)
    .await?;

    row.map(|r| r.try_into()).transpose()
  }

  async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Todo>, RepositoryError> {
    let rows = sqlx::query_as::<_, TodoRow>(
      r#"
            SELECT id, project_id, title, estimate_minutes, status
            FROM todos
            WHERE id = ANY($1)
            "#,
    )
    .bind(ids)
    .fetch_all(&self.pool)
    .await?;

    rows.into_iter().map(|r| r.try_into()).collect()
  }

  async fn find_all(&self) -> Result<Vec<Todo>, RepositoryError> {
    let rows = sqlx::query_as::<_, TodoRow>(
      r#"
            SELECT id, project_id, title, estimate_minutes, status
            FROM todos
            ORDER BY title ASC, id ASC
            "#,
    )
    .fetch_all(&self.pool)
    .await?;

    rows.into_iter().map(|r| r.try_into()).collect()
  }
}
