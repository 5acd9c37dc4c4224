//! Search Statistics Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use bazaar_app::domain::{
    categories::records::CategoryCountRecord,
    search::statistics::{PopularSearch, SearchStatistics},
};

use crate::{
    categories::get::CategoryResponse,
    extensions::*,
    media::MediaUrls,
    products::get::{ProductResponse, render_products},
    search::errors::into_status_error,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PopularCategoryResponse {
    #[serde(flatten)]
    pub category: CategoryResponse,

    /// Number of products filed under the category
    pub product_count: u64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PopularSearchResponse {
    pub term: String,
    pub count: u32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct StatisticsResponse {
    /// Newest available products
    pub trending_products: Vec<ProductResponse>,

    /// Categories with the most products
    pub popular_categories: Vec<PopularCategoryResponse>,
    pub popular_searches: Vec<PopularSearchResponse>,
}

impl From<CategoryCountRecord> for PopularCategoryResponse {
    fn from(record: CategoryCountRecord) -> Self {
        PopularCategoryResponse {
            category: record.category.into(),
            product_count: record.product_count,
        }
    }
}

impl From<PopularSearch> for PopularSearchResponse {
    fn from(search: PopularSearch) -> Self {
        PopularSearchResponse {
            term: search.term.to_string(),
            count: search.count,
        }
    }
}

impl StatisticsResponse {
    fn render(statistics: SearchStatistics, media: &MediaUrls) -> Self {
        StatisticsResponse {
            trending_products: render_products(statistics.trending_products, media),
            popular_categories: statistics
                .popular_categories
                .into_iter()
                .map(Into::into)
                .collect(),
            popular_searches: statistics
                .popular_searches
                .into_iter()
                .map(Into::into)
                .collect(),
        }
    }
}

/// Search Statistics Handler
///
/// Trending products, popular categories and popular search terms for the
/// storefront landing page.
#[endpoint(tags("search"), summary = "Search Statistics")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<StatisticsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let statistics = state
        .app
        .search
        .statistics()
        .await
        .map_err(into_status_error)?;

    Ok(Json(StatisticsResponse::render(statistics, &state.media)))
}
