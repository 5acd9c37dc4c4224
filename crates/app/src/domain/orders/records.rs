//! Order Records

use jiff::Timestamp;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{domain::products::records::ProductRecord, uuids::TypedUuid};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Order Record
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub uuid: OrderUuid,

    /// Customer account that placed the order, if any.
    pub user: Option<Uuid>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,

    /// Sum of `price * quantity` over the items, fixed when the order is placed.
    pub total_price: Decimal,
    pub paid: bool,
    pub items: Vec<OrderItemRecord>,
    pub created_at: Timestamp,
}

/// Order Item UUID
pub type OrderItemUuid = TypedUuid<OrderItemRecord>;

/// Order Item Record
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItemRecord {
    pub uuid: OrderItemUuid,
    pub product: ProductRecord,

    /// Unit price at the time of purchase.
    pub price: Decimal,
    pub quantity: u32,
    pub created_at: Timestamp,
}

impl OrderItemRecord {
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}
