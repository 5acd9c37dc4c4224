//! Get Product Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bazaar_app::domain::products::records::ProductRecord;

use crate::{
    categories::get::CategoryResponse,
    extensions::*,
    media::MediaUrls,
    products::errors::into_status_error,
    state::State,
};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    /// The unique identifier of the product
    pub uuid: Uuid,

    /// The category the product is filed under
    pub category: CategoryResponse,
    pub name: String,
    pub slug: String,

    /// Stored image path, relative to the media root
    pub image: Option<String>,

    /// Absolute image URL
    pub image_url: Option<String>,

    /// Unit price as a decimal string
    pub price: String,
    pub description: String,
    pub stock: u32,
    pub available: bool,
    pub featured: bool,

    /// The date and time the product was created
    pub created_at: String,

    /// The date and time the product was last updated
    pub updated_at: String,
}

impl ProductResponse {
    pub(crate) fn render(product: ProductRecord, media: &MediaUrls) -> Self {
        let image_url = media.image_url(product.image.as_deref());

        ProductResponse {
            uuid: product.uuid.into(),
            category: product.category.into(),
            name: product.name,
            slug: product.slug,
            image: product.image,
            image_url,
            price: product.price.to_string(),
            description: product.description,
            stock: product.stock,
            available: product.available,
            featured: product.featured,
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
        }
    }
}

pub(crate) fn render_products(products: Vec<ProductRecord>, media: &MediaUrls) -> Vec<ProductResponse> {
    products
        .into_iter()
        .map(|product| ProductResponse::render(product, media))
        .collect()
}

/// Get Product Handler
///
/// Returns a product.
#[endpoint(
    tags("products"),
    summary = "Get Product",
    responses(
        (status_code = StatusCode::OK, description = "Product"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let product = state
        .app
        .products
        .get_product(product.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProductResponse::render(product, &state.media)))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use bazaar_app::domain::products::{ProductsServiceError, records::ProductUuid};

    use crate::test_helpers::{TestApp, make_product};

    use super::*;

    fn make_service(app: TestApp) -> Service {
        app.service(Router::with_path("products/{product}").get(handler))
    }

    #[tokio::test]
    async fn test_get_product_renders_category_and_image_url() -> TestResult {
        let uuid = ProductUuid::new();

        let mut app = TestApp::new();

        app.products
            .expect_get_product()
            .once()
            .withf(move |product| *product == uuid)
            .return_once(move |_| Ok(make_product(uuid, "Royal Honey", 500)));

        let response: ProductResponse = TestClient::get(format!("http://example.com/products/{uuid}"))
            .send(&make_service(app))
            .await
            .take_json()
            .await?;

        assert_eq!(response.uuid, uuid.into_uuid());
        assert_eq!(response.name, "Royal Honey");
        assert_eq!(response.price, "500");
        assert_eq!(response.category.slug, "honey");
        assert_eq!(
            response.image_url.as_deref(),
            Some("http://example.com/media/products/honey.jpg")
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_get_unknown_product_returns_404() {
        let mut app = TestApp::new();

        app.products
            .expect_get_product()
            .once()
            .return_once(|_| Err(ProductsServiceError::NotFound));

        let res = TestClient::get(format!("http://example.com/products/{}", ProductUuid::new()))
            .send(&make_service(app))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
    }

    #[tokio::test]
    async fn test_get_product_with_malformed_uuid_returns_400() {
        let res = TestClient::get("http://example.com/products/not-a-uuid")
            .send(&make_service(TestApp::new()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }

    #[test]
    fn render_products_encodes_image_names_and_keeps_every_item() -> TestResult {
        let media = MediaUrls::new("http://example.com", "/media/")?;

        let mut spaced = make_product(ProductUuid::new(), "Wild Honey", 300);
        spaced.image = Some("products/wild honey.jpg".to_string());

        let mut bengali = make_product(ProductUuid::new(), "Khejur", 250);
        bengali.image = Some("products/খেজুর.png".to_string());

        let rendered = render_products(
            vec![make_product(ProductUuid::new(), "Royal Honey", 500), spaced, bengali],
            &media,
        );

        let urls: Vec<Option<&str>> = rendered.iter().map(|p| p.image_url.as_deref()).collect();

        assert_eq!(
            urls,
            [
                Some("http://example.com/media/products/honey.jpg"),
                Some("http://example.com/media/products/wild%20honey.jpg"),
                Some("http://example.com/media/products/%E0%A6%96%E0%A7%87%E0%A6%9C%E0%A7%81%E0%A6%B0.png"),
            ]
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_get_product_with_spaced_image_name_returns_encoded_url() -> TestResult {
        let uuid = ProductUuid::new();

        let mut app = TestApp::new();

        app.products.expect_get_product().once().return_once(move |_| {
            let mut product = make_product(uuid, "Royal Honey", 500);
            product.image = Some("products/royal honey.jpg".to_string());

            Ok(product)
        });

        let response: ProductResponse = TestClient::get(format!("http://example.com/products/{uuid}"))
            .send(&make_service(app))
            .await
            .take_json()
            .await?;

        assert_eq!(response.image.as_deref(), Some("products/royal honey.jpg"));
        assert_eq!(
            response.image_url.as_deref(),
            Some("http://example.com/media/products/royal%20honey.jpg")
        );

        Ok(())
    }
}
