pub mod change_invoice_status;
pub mod create_invoice;
pub mod delete_invoice;
pub mod get_invoice_details;
pub mod list_invoices;
pub mod mark_entries_invoiced;
pub mod next_invoice_number;
pub mod preview_invoice;
pub mod revise_preview;

pub use change_invoice_status::{
  ChangeInvoiceStatusCommand, ChangeInvoiceStatusResponse, ChangeInvoiceStatusUseCase,
};
pub use create_invoice::{CreateInvoiceCommand, CreateInvoiceUseCase};
pub use delete_invoice::{DeleteInvoiceCommand, DeleteInvoiceResponse, DeleteInvoiceUseCase};
pub use get_invoice_details::{
  GetInvoiceDetailsCommand, GetInvoiceDetailsUseCase, InvoiceDetailsResponse,
};
pub use list_invoices::{ListInvoicesResponse, ListInvoicesUseCase};
pub use mark_entries_invoiced::{
  MarkEntriesInvoicedCommand, MarkEntriesInvoicedResponse, MarkEntriesInvoicedUseCase,
};
pub use next_invoice_number::{NextInvoiceNumberResponse, NextInvoiceNumberUseCase};
pub use preview_invoice::{PreviewInvoiceCommand, PreviewInvoiceUseCase};
pub use revise_preview::{DraftEditCommand, RevisePreviewCommand, RevisePreviewUseCase};
