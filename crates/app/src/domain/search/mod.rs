//! Keyword product search.
//!
//! A search request is a single pass: the raw query is normalised into
//! tokens, the catalog is narrowed to matching available products, each
//! candidate is scored and the scored list is sorted and sliced into a page.

pub mod autocomplete;
pub mod errors;
pub mod filters;
pub mod pagination;
pub mod query;
pub mod records;
pub mod scoring;
pub mod service;
pub mod statistics;

pub use errors::SearchServiceError;
pub use service::*;
