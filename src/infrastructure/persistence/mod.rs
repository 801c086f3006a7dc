pub mod memory;
pub mod postgres;

use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::invoice::{CounterRepository, InvoiceRepository};
use crate::domain::tracking::{
  ClientRepository, ProjectRepository, TimeEntryRepository, TodoRepository,
};

pub use memory::InMemoryStore;
use postgres::{
  PostgresClientRepository, PostgresCounterRepository, PostgresInvoiceRepository,
  PostgresProjectRepository, PostgresTimeEntryRepository, PostgresTodoRepository,
};

/// One handle per repository port, all backed by the same storage.
#[derive(Clone)]
pub struct Repositories {
  pub clients: Arc<dyn ClientRepository>,
  pub projects: Arc<dyn ProjectRepository>,
  pub todos: Arc<dyn TodoRepository>,
  pub time_entries: Arc<dyn TimeEntryRepository>,
  pub invoices: Arc<dyn InvoiceRepository>,
  pub counters: Arc<dyn CounterRepository>,
}

impl Repositories {
  pub fn postgres(pool: PgPool) -> Self {
    Self {
      clients: Arc::new(PostgresClientRepository::new(pool.clone())),
      projects: Arc::new(PostgresProjectRepository::new(pool.clone())),
      todos: Arc::new(PostgresTodoRepository::new(pool.clone())),
      time_entries: Arc::new(PostgresTimeEntryRepository::new(pool.clone())),
      invoices: Arc::new(PostgresInvoiceRepository::new(pool.clone())),
      counters: Arc::new(PostgresCounterRepository::new(pool)),
    }
  }

  pub fn in_memory(store: Arc<InMemoryStore>) -> Self {
    Self {
      clients: store.clone(),
      projects: store.clone(),
      todos: store.clone(),
      time_entries: store.clone(),
      invoices: store.clone(),
      counters: store,
    }
  }
}
