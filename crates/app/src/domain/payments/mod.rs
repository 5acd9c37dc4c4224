//! Payments

pub mod data;
pub mod errors;
pub mod records;
mod repository;
pub mod service;
pub mod status;

pub use errors::PaymentsServiceError;
pub use service::*;
