//! Search Handlers

pub(crate) mod autocomplete;
pub(crate) mod index;
pub(crate) mod statistics;
