pub mod invoice;
pub mod reporting;
pub mod tracking;
