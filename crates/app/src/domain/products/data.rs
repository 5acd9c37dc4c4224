//! Products Data

use rust_decimal::Decimal;

use crate::domain::{categories::records::CategoryUuid, products::records::ProductUuid};

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub category: CategoryUuid,
    pub name: String,

    /// Derived from `name` when omitted.
    pub slug: Option<String>,
    pub image: Option<String>,
    pub price: Decimal,
    pub description: String,
    pub stock: u32,
    pub available: bool,
    pub featured: bool,
}

/// Product Update Data
#[derive(Debug, Clone, PartialEq)]
pub struct ProductUpdate {
    pub category: CategoryUuid,
    pub name: String,

    /// Derived from `name` when omitted.
    pub slug: Option<String>,
    pub image: Option<String>,
    pub price: Decimal,
    pub description: String,
    pub stock: u32,
    pub available: bool,
    pub featured: bool,
}

/// Catalog listing filters. Listings only ever contain available products.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub category_slug: Option<String>,
    pub featured: Option<bool>,
}
