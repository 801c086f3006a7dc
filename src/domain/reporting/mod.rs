pub mod entities;
pub mod errors;
pub mod services;

pub use entities::{ClientSummary, RangeSummary, SummaryTotals};
pub use errors::ReportingError;
pub use services::ReportingService;
