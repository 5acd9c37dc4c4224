//! Featured Products Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    products::{get::render_products, index::ProductsResponse},
    state::State,
};

/// Featured Products Handler
///
/// Returns the newest available featured products.
#[endpoint(tags("products"), summary = "Featured Products")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<ProductsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let products = state
        .app
        .products
        .featured_products()
        .await
        .or_500("failed to fetch featured products")?;

    Ok(Json(ProductsResponse {
        products: render_products(products, &state.media),
    }))
}
