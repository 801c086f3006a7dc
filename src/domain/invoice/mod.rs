pub mod entities;
pub mod errors;
pub mod ports;
pub mod pricing;
pub mod services;
pub mod value_objects;

pub use entities::{
  DraftEdit, DraftLine, Invoice, InvoiceDraft, InvoiceLine, InvoicePreview, InvoiceTotals,
  ManualLine,
};
pub use errors::InvoiceError;
pub use ports::{CounterRepository, InvoiceRepository};
pub use services::{InvoiceData, InvoiceService, InvoiceServiceDependencies, InvoiceSettings};
pub use value_objects::{InvoiceNumber, InvoiceStatus};
