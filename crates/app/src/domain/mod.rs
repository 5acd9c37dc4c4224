//! Storefront Domain Concerns

pub mod categories;
pub mod orders;
pub mod payments;
pub mod products;
pub mod search;

mod slugs;
