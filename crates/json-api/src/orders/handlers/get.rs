//! Get Order Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bazaar_app::domain::orders::records::{OrderItemRecord, OrderRecord};

use crate::{
    extensions::*,
    media::MediaUrls,
    orders::errors::into_status_error,
    products::get::ProductResponse,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    pub uuid: Uuid,
    pub product: ProductResponse,

    /// Unit price at the time of purchase
    pub price: String,
    pub quantity: u32,

    /// `price * quantity`
    pub line_total: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    /// The unique identifier of the order
    pub uuid: Uuid,

    /// Customer account that placed the order
    pub user: Option<Uuid>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,

    /// Order total as a decimal string
    pub total_price: String,
    pub paid: bool,
    pub items: Vec<OrderItemResponse>,

    /// The date and time the order was placed
    pub created_at: String,
}

impl OrderItemResponse {
    fn render(item: OrderItemRecord, media: &MediaUrls) -> Self {
        let line_total = item.line_total().to_string();

        OrderItemResponse {
            uuid: item.uuid.into(),
            product: ProductResponse::render(item.product, media),
            price: item.price.to_string(),
            quantity: item.quantity,
            line_total,
        }
    }
}

impl OrderResponse {
    pub(crate) fn render(order: OrderRecord, media: &MediaUrls) -> Self {
        let items = order
            .items
            .into_iter()
            .map(|item| OrderItemResponse::render(item, media))
            .collect();

        OrderResponse {
            uuid: order.uuid.into(),
            user: order.user,
            name: order.name,
            email: order.email,
            phone: order.phone,
            address: order.address,
            total_price: order.total_price.to_string(),
            paid: order.paid,
            items,
            created_at: order.created_at.to_string(),
        }
    }
}

/// Get Order Handler
///
/// Returns an order with its items.
#[endpoint(
    tags("orders"),
    summary = "Get Order",
    responses(
        (status_code = StatusCode::OK, description = "Order"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let order = state
        .app
        .orders
        .get_order(order.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(OrderResponse::render(order, &state.media)))
}
