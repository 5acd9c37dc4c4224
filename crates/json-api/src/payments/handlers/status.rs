//! Update Payment Status Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bazaar_app::domain::payments::status::PaymentStatus;

use crate::{
    extensions::*,
    payments::{errors::into_status_error, get::PaymentResponse},
    state::State,
};

/// Payment Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdatePaymentStatusRequest {
    /// One of `pending`, `processing`, `completed`, `failed`, `cancelled`
    pub status: String,
}

/// Update Payment Status Handler
///
/// Moves a payment through its lifecycle. Completing a payment marks the
/// order paid.
#[endpoint(
    tags("payments"),
    summary = "Update Payment Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Payment updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status"),
        (status_code = StatusCode::NOT_FOUND, description = "Payment not found"),
        (status_code = StatusCode::CONFLICT, description = "Transition not allowed"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
    ),
)]
pub(crate) async fn handler(
    payment: PathParam<Uuid>,
    json: JsonBody<UpdatePaymentStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<PaymentResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let status = json
        .into_inner()
        .status
        .trim()
        .to_lowercase()
        .parse::<PaymentStatus>()
        .or_400("unknown payment status")?;

    let payment = state
        .app
        .payments
        .update_status(payment.into_inner().into(), status)
        .await
        .map_err(into_status_error)?;

    Ok(Json(payment.into()))
}
