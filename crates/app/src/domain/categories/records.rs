//! Category Records

use crate::uuids::TypedUuid;

/// Category UUID
pub type CategoryUuid = TypedUuid<CategoryRecord>;

/// Category Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRecord {
    /// Unique category identifier.
    pub uuid: CategoryUuid,

    /// Unique display name.
    pub name: String,

    /// Unique URL slug.
    pub slug: String,
}

/// A category together with the number of products filed under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCountRecord {
    pub category: CategoryRecord,
    pub product_count: u64,
}
