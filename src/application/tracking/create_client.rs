use rust_decimal::Decimal;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::tracking::{
  BankDetails, Client, ClientData, ClientName, CurrencyCode, HourlyRate, PayoneerDetails,
  TrackingError, TrackingService,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientCommand {
  pub id: Option<Uuid>,
  pub name: String,
  pub address: Option<String>,
  pub email: Option<String>,
  pub currency: Option<String>,
  pub default_rate: Option<Decimal>,
  pub terms: Option<String>,
  pub payoneer: Option<PayoneerDetails>,
  pub bank: Option<BankDetails>,
}

pub struct CreateClientUseCase {
  tracking_service: Arc<TrackingService>,
  default_currency: CurrencyCode,
}

impl CreateClientUseCase {
  pub fn new(tracking_service: Arc<TrackingService>, default_currency: CurrencyCode) -> Self {
    Self {
      tracking_service,
      default_currency,
    }
  }

  pub async fn execute(&self, command: CreateClientCommand) -> Result<Client, TrackingError> {
    let currency = match command.currency.as_deref() {
      Some(code) if !code.trim().is_empty() => CurrencyCode::new(code)?,
      _ => self.default_currency.clone(),
    };

    let data = ClientData {
      id: command.id,
      name: ClientName::new(command.name)?,
      address: command.address.unwrap_or_default(),
      email: command.email.unwrap_or_default(),
      currency,
      default_rate: HourlyRate::new(command.default_rate.unwrap_or(Decimal::ZERO))?,
      terms: command.terms.unwrap_or_default(),
      payoneer: command.payoneer.unwrap_or_default(),
      bank: command.bank.unwrap_or_default(),
    };

    self.tracking_service.create_client(data).await
  }
}
