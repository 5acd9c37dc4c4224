//! Get Payment Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bazaar_app::domain::payments::records::PaymentRecord;

use crate::{extensions::*, payments::errors::into_status_error, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PaymentResponse {
    /// The unique identifier of the payment
    pub uuid: Uuid,

    /// The order being paid for
    pub order: Uuid,

    /// Reference quoted to the customer
    pub transaction_id: String,

    /// Amount as a decimal string
    pub amount: String,

    /// One of `bkash`, `rocket`, `nagad`, `card`
    pub payment_method: String,

    /// One of `pending`, `processing`, `completed`, `failed`, `cancelled`
    pub status: String,
    pub mobile_number: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<PaymentRecord> for PaymentResponse {
    fn from(payment: PaymentRecord) -> Self {
        PaymentResponse {
            uuid: payment.uuid.into(),
            order: payment.order.into(),
            transaction_id: payment.transaction_id,
            amount: payment.amount.to_string(),
            payment_method: payment.payment_method.to_string(),
            status: payment.status.to_string(),
            mobile_number: payment.mobile_number,
            created_at: payment.created_at.to_string(),
            updated_at: payment.updated_at.to_string(),
        }
    }
}

/// Get Payment Handler
#[endpoint(
    tags("payments"),
    summary = "Get Payment",
    responses(
        (status_code = StatusCode::OK, description = "Payment"),
        (status_code = StatusCode::NOT_FOUND, description = "Payment not found"),
    ),
)]
pub(crate) async fn handler(
    payment: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<PaymentResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let payment = state
        .app
        .payments
        .get_payment(payment.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(payment.into()))
}
