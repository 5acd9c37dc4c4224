//! Orders Data

use uuid::Uuid;

use crate::domain::{orders::records::OrderUuid, products::records::ProductUuid};

/// New Order Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub uuid: OrderUuid,
    pub user: Option<Uuid>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub items: Vec<NewOrderItem>,
}

/// A line of a new order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewOrderItem {
    pub product: ProductUuid,
    pub quantity: u32,
}
