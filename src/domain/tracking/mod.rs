pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use entities::{
  BankDetails, Client, DateRange, NewTimeEntry, PayoneerDetails, Project, TimeEntry, Todo,
};
pub use errors::{RepositoryError, TrackingError};
pub use ports::{ClientRepository, ProjectRepository, TimeEntryRepository, TodoRepository};
pub use services::{ClientData, ProjectData, TodoData, TrackingService};
pub use value_objects::{
  ClientName, CurrencyCode, DurationSeconds, HourlyRate, ProjectName, ProjectStatus, TodoStatus,
  TodoTitle, ValueObjectError,
};
