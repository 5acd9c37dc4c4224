//! Update Product Handler

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

use bazaar_app::domain::products::data::ProductUpdate;

use crate::{
    extensions::*,
    money::parse_amount,
    products::{create::default_available, errors::into_status_error, get::ProductResponse},
    state::State,
};

/// Update Product Request
///
/// Replaces every editable field of the product.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateProductRequest {
    pub category: Uuid,
    pub name: String,

    /// Derived from the name when omitted
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub image: Option<String>,

    /// Unit price as a decimal string
    pub price: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub stock: u32,
    #[serde(default = "default_available")]
    pub available: bool,
    #[serde(default)]
    pub featured: bool,
}

impl UpdateProductRequest {
    fn into_update(self) -> Result<ProductUpdate, StatusError> {
        Ok(ProductUpdate {
            category: self.category.into(),
            price: parse_amount("price", &self.price)?,
            name: self.name,
            slug: self.slug,
            image: self.image,
            description: self.description,
            stock: self.stock,
            available: self.available,
            featured: self.featured,
        })
    }
}

/// Product Update Handler
#[endpoint(
    tags("products"),
    summary = "Update Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "products.update",
    skip(product, json, depot),
    fields(product_uuid = tracing::field::Empty, price = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<UpdateProductRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let product = product.into_inner();
    let update = json.into_inner().into_update()?;

    let span = tracing::Span::current();
    span.record("product_uuid", tracing::field::display(product));
    span.record("price", tracing::field::display(update.price));

    let product = state
        .app
        .products
        .update_product(product.into(), update)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProductResponse::render(product, &state.media)))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use bazaar_app::domain::products::{ProductsServiceError, records::ProductUuid};

    use crate::test_helpers::{TestApp, make_product};

    use super::*;

    fn make_service(app: TestApp) -> Service {
        app.service(Router::with_path("products/{product}").put(handler))
    }

    #[tokio::test]
    async fn test_update_product_success() -> TestResult {
        let uuid = ProductUuid::new();

        let mut app = TestApp::new();

        app.products
            .expect_update_product()
            .once()
            .withf(move |product, update| {
                *product == uuid
                    && update.price == Decimal::new(450, 0)
                    && update.stock == 3
                    && !update.available
            })
            .return_once(move |_, _| {
                let mut product = make_product(uuid, "Royal Honey", 450);
                product.stock = 3;
                product.available = false;

                Ok(product)
            });

        let response: ProductResponse = TestClient::put(format!("http://example.com/products/{uuid}"))
            .json(&json!({
                "category": Uuid::now_v7(),
                "name": "Royal Honey",
                "price": "450",
                "stock": 3,
                "available": false,
            }))
            .send(&make_service(app))
            .await
            .take_json()
            .await?;

        assert_eq!(response.price, "450");
        assert_eq!(response.stock, 3);
        assert!(!response.available, "expected product to be unavailable");

        Ok(())
    }

    #[tokio::test]
    async fn test_update_unknown_product_returns_404() {
        let mut app = TestApp::new();

        app.products
            .expect_update_product()
            .once()
            .return_once(|_, _| Err(ProductsServiceError::NotFound));

        let res = TestClient::put(format!("http://example.com/products/{}", ProductUuid::new()))
            .json(&json!({
                "category": Uuid::now_v7(),
                "name": "Royal Honey",
                "price": "450",
            }))
            .send(&make_service(app))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
    }
}
