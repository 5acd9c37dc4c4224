//! Payment Errors

use salvo::http::StatusError;
use tracing::error;

use bazaar_app::domain::payments::PaymentsServiceError;

pub(crate) fn into_status_error(error: PaymentsServiceError) -> StatusError {
    match error {
        PaymentsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Payment already exists")
        }
        PaymentsServiceError::InvalidTransition(transition) => {
            StatusError::conflict().brief(transition.to_string())
        }
        PaymentsServiceError::MissingRequiredData | PaymentsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid payment payload")
        }
        PaymentsServiceError::OrderNotFound => StatusError::not_found().brief("Order not found"),
        PaymentsServiceError::NotFound => StatusError::not_found().brief("Payment not found"),
        PaymentsServiceError::Sql(source) => {
            error!("payment storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
