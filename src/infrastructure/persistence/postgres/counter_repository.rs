use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::invoice::ports::CounterRepository;
use crate::domain::tracking::RepositoryError;

pub struct PostgresCounterRepository {
  pool: PgPool,
}

impl PostgresCounterRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl CounterRepository for PostgresCounterRepository {
  async fn next_value(&self, key: &str, seed: i64) -> Result<i64, RepositoryError> {
    // Single statement: concurrent callers never observe the same value.
    let value: i64 = sqlx::query_scalar(
      r#"
            INSERT INTO counters (key, value)
            VALUES ($1, $2 + 1)
            ON CONFLICT (key) DO UPDATE SET value = counters.value + 1
            RETURNING value - 1
            "#,
    )
    .bind(key)
    .bind(seed)
    .fetch_one(&self.pool)
    .await?;

    Ok(value)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use sqlx::postgres::PgPoolOptions;
  use testcontainers::ImageExt;
  use testcontainers_modules::postgres::Postgres;
  use testcontainers_modules::testcontainers::{ContainerAsync, runners::AsyncRunner};

  async fn setup_test_db() -> (PgPool, ContainerAsync<Postgres>) {
    let container = Postgres::default()
      .with_tag("16-alpine")
      .start()
      .await
      .expect("Failed to start postgres container");

    let host = container.get_host().await.expect("Failed to get host");
    let port = container
      .get_host_port_ipv4(5432)
      .await
      .expect("Failed to get port");
    let database_url = format!("postgres://postgres:postgres@{}:{}/postgres", host, port);

    let pool = PgPoolOptions::new()
      .max_connections(5)
      .connect(&database_url)
      .await
      .expect("Failed to connect to test database");

    sqlx::migrate!("./migrations")
      .run(&pool)
      .await
      .expect("Failed to run migrations");

    (pool, container)
  }

  #[tokio::test]
  #[ignore = "requires Docker"]
  async fn test_first_value_is_seed_then_increments() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresCounterRepository::new(pool);

    assert_eq!(repo.next_value("invoice", 1001).await.unwrap(), 1001);
    assert_eq!(repo.next_value("invoice", 1001).await.unwrap(), 1002);
    // Seed only applies on first use
    assert_eq!(repo.next_value("invoice", 5000).await.unwrap(), 1003);
    assert_eq!(repo.next_value("other", 1).await.unwrap(), 1);
  }

  #[tokio::test]
  #[ignore = "requires Docker"]
  async fn test_concurrent_callers_get_distinct_values() {
    let (pool, _container) = setup_test_db().await;
    let repo = std::sync::Arc::new(PostgresCounterRepository::new(pool));

    let mut handles = Vec::new();
    for _ in 0..10 {
      let repo = repo.clone();
      handles.push(tokio::spawn(async move {
        repo.next_value("invoice", 1001).await.unwrap()
      }));
    }
    let mut values = Vec::new();
    for handle in handles {
      values.push(handle.await.unwrap());
    }
    values.sort();
    assert_eq!(values, (1001..1011).collect::<Vec<i64>>());
  }
}
