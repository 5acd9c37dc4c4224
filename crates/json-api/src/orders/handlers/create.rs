//! Create Order Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use bazaar_app::domain::orders::{
    data::{NewOrder, NewOrderItem},
    records::OrderUuid,
};

use crate::{
    extensions::*,
    observability,
    orders::{errors::into_status_error, get::OrderResponse},
    state::State,
};

fn default_quantity() -> u32 {
    1
}

/// Order Line Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemRequest {
    pub product: Uuid,

    /// Defaults to 1
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

/// Place Order Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateOrderRequest {
    /// Customer account placing the order
    #[serde(default)]
    pub user: Option<Uuid>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub items: Vec<OrderItemRequest>,
}

impl From<CreateOrderRequest> for NewOrder {
    fn from(request: CreateOrderRequest) -> Self {
        NewOrder {
            uuid: OrderUuid::new(),
            user: request.user,
            name: request.name,
            email: request.email,
            phone: request.phone,
            address: request.address,
            items: request
                .items
                .into_iter()
                .map(|item| NewOrderItem {
                    product: item.product.into(),
                    quantity: item.quantity,
                })
                .collect(),
        }
    }
}

/// Place Order Handler
///
/// Prices each line at the current product price, reserves stock and
/// records the order in one step.
#[endpoint(
    tags("orders"),
    summary = "Place Order",
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let order = state
        .app
        .orders
        .place_order(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    info!(order = %order.uuid, total = %order.total_price, "order received");

    observability::record_order_placed();

    res.add_header(LOCATION, format!("/orders/{}", order.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(OrderResponse::render(order, &state.media)))
}
