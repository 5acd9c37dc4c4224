//! Payments Data

use rust_decimal::Decimal;

use crate::domain::{
    orders::records::OrderUuid,
    payments::{records::PaymentUuid, status::PaymentMethod},
};

/// New Payment Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPayment {
    pub uuid: PaymentUuid,
    pub order: OrderUuid,
    pub amount: Decimal,
    pub payment_method: PaymentMethod,
    pub mobile_number: Option<String>,
}
