pub mod create_client;
pub mod create_project;
pub mod create_todo;
pub mod list_catalog;
pub mod list_recent_entries;
pub mod log_time_entry;

pub use create_client::{CreateClientCommand, CreateClientUseCase};
pub use create_project::{CreateProjectCommand, CreateProjectUseCase};
pub use create_todo::{CreateTodoCommand, CreateTodoUseCase};
pub use list_catalog::{CatalogResponse, ListCatalogUseCase};
pub use list_recent_entries::{ListRecentEntriesCommand, ListRecentEntriesUseCase};
pub use log_time_entry::{LogTimeEntryCommand, LogTimeEntryUseCase};
