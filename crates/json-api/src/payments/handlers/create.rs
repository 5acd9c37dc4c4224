//! Create Payment Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bazaar_app::domain::payments::{
    data::NewPayment, records::PaymentUuid, status::PaymentMethod,
};

use crate::{
    extensions::*,
    money::parse_amount,
    payments::{errors::into_status_error, get::PaymentResponse},
    state::State,
};

/// Create Payment Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreatePaymentRequest {
    pub order: Uuid,

    /// Amount as a decimal string
    pub amount: String,

    /// One of `bkash`, `rocket`, `nagad`, `card`
    pub payment_method: String,

    /// Wallet number for mobile payments
    #[serde(default)]
    pub mobile_number: Option<String>,
}

impl CreatePaymentRequest {
    fn into_new_payment(self) -> Result<NewPayment, StatusError> {
        let payment_method = self
            .payment_method
            .trim()
            .to_lowercase()
            .parse::<PaymentMethod>()
            .or_400("unknown payment method")?;

        Ok(NewPayment {
            uuid: PaymentUuid::new(),
            order: self.order.into(),
            amount: parse_amount("amount", &self.amount)?,
            payment_method,
            mobile_number: self.mobile_number,
        })
    }
}

/// Create Payment Handler
///
/// Records a pending payment against an order and issues its transaction id.
#[endpoint(
    tags("payments"),
    summary = "Create Payment",
    responses(
        (status_code = StatusCode::CREATED, description = "Payment created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreatePaymentRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<PaymentResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let payment = json.into_inner().into_new_payment()?;

    let payment = state
        .app
        .payments
        .create_payment(payment)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/payments/{}", payment.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(payment.into()))
}
