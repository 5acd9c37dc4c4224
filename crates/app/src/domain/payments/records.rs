//! Payment Records

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::{
    domain::{
        orders::records::OrderUuid,
        payments::status::{PaymentMethod, PaymentStatus},
    },
    uuids::TypedUuid,
};

/// Payment UUID
pub type PaymentUuid = TypedUuid<PaymentRecord>;

/// Payment Record
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentRecord {
    pub uuid: PaymentUuid,
    pub order: OrderUuid,

    /// Reference quoted to the customer, e.g. `TXN4F2A91C0`.
    pub transaction_id: String,
    pub amount: Decimal,
    pub payment_method: PaymentMethod,
    pub status: PaymentStatus,
    pub mobile_number: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
