use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::domain::tracking::{
  BankDetails, Client, ClientName, ClientRepository, CurrencyCode, HourlyRate, PayoneerDetails,
  RepositoryError,
};

#[derive(Debug, FromRow)]
struct ClientRow {
  id: Uuid,
  name: String,
  address: String,
  email: String,
  currency: String,
  default_rate: Decimal,
  terms: String,
  payoneer: Json<PayoneerDetails>,
  bank: Json<BankDetails>,
}

impl TryFrom<ClientRow> for Client {
  type Error = RepositoryError;

  fn try_from(row: ClientRow) -> Result<Self, Self::Error> {
    Ok(Client {
      id: row.id,
      name: ClientName::new(row.name)?,
      address: row.address,
      email: row.email,
      currency: CurrencyCode::new(&row.currency)?,
      default_rate: HourlyRate::new(row.default_rate)?,
      terms: row.terms,
      payoneer: row.payoneer.0,
      bank: row.bank.0,
    })
  }
}

pub struct PostgresClientRepository {
  pool: PgPool,
}

impl PostgresClientRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl ClientRepository for PostgresClientRepository {
  async fn create(&self, client: Client) -> Result<Client, RepositoryError> {
    let row = sqlx::query_as::<_, ClientRow>(
      r#"
            INSERT INTO clients (
                id, name, address, email, currency, default_rate, terms, payoneer, bank
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, name, address, email, currency, default_rate, terms, payoneer, bank
            "#,
    )
    .bind(client.id)
    .bind(client.name.value())
    .bind(&client.address)
    .bind(&client.email)
    .bind(client.currency.as_str())
    .bind(client.default_rate.value())
    .bind(&client.terms)
    .bind(Json(&client.payoneer))
    .bind(Json(&client.bank))
    .fetch_one(&self.pool)
    .await?;

    row.try_into()
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Client>, RepositoryError> {
    let row = sqlx::query_as::<_, ClientRow>(
      r#"
            SELECT id, name, address, email, currency, default_rate, terms, payoneer, bank
            FROM clients
            WHERE id = $1
            "#,
    )
    .bind(id)
    .fetch_optional(&self.pool)
    .await?;

    row.map(|r| r.try_into()).transpose()
  }

  async fn find_all(&self) -> Result<Vec<Client>, RepositoryError> {
    let rows = sqlx::query_as::<_, ClientRow>(
      r#"
            SELECT id, name, address, email, currency, default_rate, terms, payoneer, bank
            FROM clients
            ORDER BY name ASC, id ASC
            "#,
    )
    .fetch_all(&self.pool)
    .await?;

    rows.into_iter().map(|r| r.try_into()).collect()
  }
}
