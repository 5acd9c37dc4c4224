//! Product Records

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::{domain::categories::records::CategoryRecord, uuids::TypedUuid};

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Product Record
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub uuid: ProductUuid,

    /// The category the product is filed under.
    pub category: CategoryRecord,
    pub name: String,
    pub slug: String,

    /// Path of the product image relative to the media root.
    pub image: Option<String>,
    pub price: Decimal,
    pub description: String,
    pub stock: u32,
    pub available: bool,
    pub featured: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ProductRecord {
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}
