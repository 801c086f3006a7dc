pub mod export_time_entries;
pub mod get_uninvoiced_amount;
pub mod summarize_range;

pub use export_time_entries::{ExportTimeEntriesCommand, ExportTimeEntriesUseCase};
pub use get_uninvoiced_amount::{GetUninvoicedAmountUseCase, UninvoicedAmountResponse};
pub use summarize_range::{SummarizeRangeCommand, SummarizeRangeUseCase};
