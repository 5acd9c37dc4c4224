//! Products By Category Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    extensions::*,
    products::{errors::into_status_error, get::render_products, index::ProductsResponse},
    state::State,
};

/// Products By Category Handler
///
/// Returns the available products in one category.
#[endpoint(
    tags("products"),
    summary = "Products By Category",
    responses(
        (status_code = StatusCode::OK, description = "Products in the category"),
        (status_code = StatusCode::BAD_REQUEST, description = "category_slug parameter is required"),
        (status_code = StatusCode::NOT_FOUND, description = "Category not found"),
    ),
)]
pub(crate) async fn handler(
    category_slug: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<ProductsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let Some(slug) = category_slug
        .into_inner()
        .map(|slug| slug.trim().to_string())
        .filter(|slug| !slug.is_empty())
    else {
        return Err(StatusError::bad_request().brief("category_slug parameter is required"));
    };

    let products = state
        .app
        .products
        .products_by_category(&slug)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProductsResponse {
        products: render_products(products, &state.media),
    }))
}
