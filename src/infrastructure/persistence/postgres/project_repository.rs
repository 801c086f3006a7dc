use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::tracking::{
  HourlyRate, Project, ProjectName, ProjectRepository, ProjectStatus, RepositoryError,
};

#[derive(Debug, FromRow)]
struct ProjectRow {
  id: Uuid,
  client_id: Uuid,
  name: String,
  rate_override: Option<Decimal>,
  status: String,
}

impl TryFrom<ProjectRow> for Project {
  type Error = RepositoryError;

  fn try_from(row: ProjectRow) -> Result<Self, Self::Error> {
    Ok(Project {
      id: row.id,
      client_id: row.client_id,
      name: ProjectName::new(row.name)?,
      rate_override: row.rate_override.map(HourlyRate::new).transpose()?,
      status: ProjectStatus::from_str(&row.status)?,
    })
  }
}

pub struct PostgresProjectRepository {
  pool: PgPool,
}

impl PostgresProjectRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl ProjectRepository for PostgresProjectRepository {
  async fn create(&self, project: Project) -> Result<Project, RepositoryError> {
    let row = sqlx::query_as::<_, ProjectRow>(
      r#"
            INSERT INTO projects (id, client_id, name, rate_override, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, client_id, name, rate_override, status
            "#,
    )
    .bind(project.id)
    .bind(project.client_id)
    .bind(project.name.value())
    .bind(project.rate_override.map(|r| r.value()))
    .bind(project.status.as_str())
    .fetch_one(&self.pool)
    .await?;

    row.try_into()
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Project>, RepositoryError> {
    let row = sqlx::query_as::<_, ProjectRow>(
      r#"
            SELECT id, client_id, name, rate_override, status
            FROM projects
            WHERE id = $1
            "#,
    )
    .bind(id)
    .fetch_optional(&self.pool)
    .await?;

    row.map(|r| r.try_into()).transpose()
  }

  async fn find_by_client_id(&self, client_id: Uuid) -> Result<Vec<Project>, RepositoryError> {
    let rows = sqlx::query_as::<_, ProjectRow>(
      r#"
            SELECT id, client_id, name, rate_override, status
            FROM projects
            WHERE client_id = $1
            ORDER BY name ASC, id ASC
            "#,
    )
    .bind(client_id)
    .fetch_all(&self.pool)
    .await?;

    rows.into_iter().map(|r| r.try_into()).collect()
  }

  async fn find_all(&self) -> Result<Vec<Project>, RepositoryError> {
    let rows = sqlx::query_as::<_, ProjectRow>(
      r#"
            SELECT id, client_id, name, rate_override, status
            FROM projects
            ORDER BY name ASC, id ASC
            "#,
    )
    .fetch_all(&self.pool)
    .await?;

    rows.into_iter().map(|r| r.try_into()).collect()
  }
}
