//! Application layer
//!
//! Use cases that orchestrate the domain services for the HTTP adapter.

pub mod invoice;
pub mod reporting;
pub mod tracking;
