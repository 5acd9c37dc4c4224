//! Create Product Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bazaar_app::domain::products::data::NewProduct;

use crate::{
    extensions::*,
    money::parse_amount,
    products::{errors::into_status_error, get::ProductResponse},
    state::State,
};

pub(crate) fn default_available() -> bool {
    true
}

/// Create Product Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateProductRequest {
    /// Generated when omitted
    #[serde(default)]
    pub uuid: Option<Uuid>,
    pub category: Uuid,
    pub name: String,

    /// Derived from the name when omitted
    #[serde(default)]
    pub slug: Option<String>,

    /// Image path relative to the media root
    #[serde(default)]
    pub image: Option<String>,

    /// Unit price as a decimal string, e.g. `"499.50"`
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

impl CreateProductRequest {
    fn into_new_product(self) -> Result<NewProduct, StatusError> {
        Ok(NewProduct {
            uuid: self.uuid.map(Into::into).unwrap_or_default(),
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

/// Create Product Handler
#[endpoint(
    tags("products"),
    summary = "Create Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Product created"),
        (status_code = StatusCode::CONFLICT, description = "Product already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateProductRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let product = json.into_inner().into_new_product()?;

    let product = state
        .app
        .products
        .create_product(product)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/products/{}", product.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(ProductResponse::render(product, &state.media)))
}
