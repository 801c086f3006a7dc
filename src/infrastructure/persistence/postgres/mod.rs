pub mod client_repository;
pub mod counter_repository;
pub mod invoice_repository;
pub mod project_repository;
pub mod time_entry_repository;
pub mod todo_repository;

pub use client_repository::PostgresClientRepository;
pub use counter_repository::PostgresCounterRepository;
pub use invoice_repository::PostgresInvoiceRepository;
pub use project_repository::PostgresProjectRepository;
pub use time_entry_repository::PostgresTimeEntryRepository;
pub use todo_repository::PostgresTodoRepository;
