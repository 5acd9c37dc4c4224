//! Product Search Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use bazaar_app::domain::search::{
    SearchRequest,
    filters::SearchFilters,
    records::{ScoredProduct, SearchResults},
};

use crate::{
    extensions::*,
    media::MediaUrls,
    observability,
    products::get::ProductResponse,
    search::errors::SearchError,
    state::State,
};

/// A matching product with its relevance score.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SearchProductResponse {
    #[serde(flatten)]
    pub product: ProductResponse,

    /// Heuristic match strength; only meaningful within one result set
    pub relevance_score: u64,
}

/// Filters as the caller sent them.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SearchFiltersResponse {
    pub category: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SearchResponse {
    pub success: bool,

    /// The trimmed query
    pub query: String,
    pub total_results: usize,
    pub total_pages: usize,
    pub current_page: u64,
    pub products: Vec<SearchProductResponse>,
    pub filters: SearchFiltersResponse,
}

impl From<SearchFilters> for SearchFiltersResponse {
    fn from(filters: SearchFilters) -> Self {
        SearchFiltersResponse {
            category: filters.category,
            min_price: filters.min_price,
            max_price: filters.max_price,
        }
    }
}

impl SearchResponse {
    fn render(results: SearchResults, media: &MediaUrls) -> Self {
        let products = results
            .products
            .into_iter()
            .map(|ScoredProduct { product, relevance_score }| SearchProductResponse {
                product: ProductResponse::render(product, media),
                relevance_score,
            })
            .collect();

        SearchResponse {
            success: true,
            query: results.query,
            total_results: results.total_results,
            total_pages: results.total_pages,
            current_page: results.current_page,
            products,
            filters: results.filters.into(),
        }
    }
}

/// Product Search Handler
///
/// Keyword search over available products, ranked by relevance and paged
/// twenty at a time. Unknown categories and unparseable price bounds are
/// ignored.
#[endpoint(tags("search"), summary = "Search Products")]
pub(crate) async fn handler(
    q: QueryParam<String, false>,
    category: QueryParam<String, false>,
    min_price: QueryParam<String, false>,
    max_price: QueryParam<String, false>,
    page: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<SearchResponse>, SearchError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let request = SearchRequest {
        query: q.into_inner().unwrap_or_default(),
        filters: SearchFilters {
            category: category.into_inner(),
            min_price: min_price.into_inner(),
            max_price: max_price.into_inner(),
        },
        page: page.into_inner(),
    };

    let results = state.app.search.search(request).await?;

    debug!(
        query = %results.query,
        total_results = results.total_results,
        page = results.current_page,
        "search completed"
    );

    observability::observe_search(results.total_results);

    Ok(Json(SearchResponse::render(results, &state.media)))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::Value;
    use testresult::TestResult;

    use bazaar_app::domain::{products::records::ProductUuid, search::SearchServiceError};

    use crate::test_helpers::{TestApp, make_product};

    use super::*;

    fn make_service(app: TestApp) -> Service {
        app.service(Router::with_path("search").get(handler))
    }

    fn honey_results(filters: SearchFilters) -> SearchResults {
        SearchResults {
            query: "honey".to_string(),
            total_results: 2,
            total_pages: 1,
            current_page: 1,
            products: vec![
                ScoredProduct {
                    product: make_product(ProductUuid::new(), "Royal Honey", 500),
                    relevance_score: 195,
                },
                ScoredProduct {
                    product: make_product(ProductUuid::new(), "Wild Honey", 300),
                    relevance_score: 180,
                },
            ],
            filters,
        }
    }

    #[tokio::test]
    async fn test_search_returns_ranked_products() -> TestResult {
        let mut app = TestApp::new();

        app.search
            .expect_search()
            .once()
            .withf(|request| request.query == "honey" && request.page.is_none())
            .return_once(|request| Ok(honey_results(request.filters)));

        let response: SearchResponse = TestClient::get("http://example.com/search?q=honey")
            .send(&make_service(app))
            .await
            .take_json()
            .await?;

        let ranked: Vec<(&str, u64)> = response
            .products
            .iter()
            .map(|p| (p.product.name.as_str(), p.relevance_score))
            .collect();

        assert!(response.success, "expected success");
        assert_eq!(response.total_results, 2);
        assert_eq!(ranked, [("Royal Honey", 195), ("Wild Honey", 180)]);

        Ok(())
    }

    #[tokio::test]
    async fn test_search_products_are_flat_with_score() -> TestResult {
        let mut app = TestApp::new();

        app.search
            .expect_search()
            .once()
            .return_once(|request| Ok(honey_results(request.filters)));

        let body: Value = TestClient::get("http://example.com/search?q=honey")
            .send(&make_service(app))
            .await
            .take_json()
            .await?;

        let first = body.pointer("/products/0");

        assert_eq!(
            first.and_then(|p| p.get("name")).and_then(Value::as_str),
            Some("Royal Honey")
        );
        assert_eq!(
            first.and_then(|p| p.get("relevance_score")).and_then(Value::as_u64),
            Some(195)
        );
        assert_eq!(
            first.and_then(|p| p.pointer("/category/slug")).and_then(Value::as_str),
            Some("honey")
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_search_forwards_filters_and_echoes_them() -> TestResult {
        let mut app = TestApp::new();

        app.search
            .expect_search()
            .once()
            .withf(|request| {
                request.filters
                    == SearchFilters {
                        category: Some("honey".to_string()),
                        min_price: Some("100".to_string()),
                        max_price: Some("abc".to_string()),
                    }
                    && request.page.as_deref() == Some("2")
            })
            .return_once(|request| Ok(honey_results(request.filters)));

        let response: SearchResponse = TestClient::get(
            "http://example.com/search?q=honey&category=honey&min_price=100&max_price=abc&page=2",
        )
        .send(&make_service(app))
        .await
        .take_json()
        .await?;

        assert_eq!(response.filters.category.as_deref(), Some("honey"));
        assert_eq!(response.filters.max_price.as_deref(), Some("abc"));

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_query_returns_400_with_error_body() -> TestResult {
        let mut app = TestApp::new();

        app.search
            .expect_search()
            .once()
            .withf(|request| request.query.is_empty())
            .return_once(|_| Err(SearchServiceError::InvalidQuery));

        let mut res = TestClient::get("http://example.com/search")
            .send(&make_service(app))
            .await;

        let body: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.get("success"), Some(&Value::Bool(false)));
        assert_eq!(
            body.get("error").and_then(Value::as_str),
            Some("Search query is required")
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_page_keeps_every_result_with_encoded_image_names() -> TestResult {
        let mut app = TestApp::new();

        app.search
            .expect_search()
            .once()
            .return_once(|request| {
                let mut results = honey_results(request.filters);

                if let Some(scored) = results.products.first_mut() {
                    scored.product.image = Some("products/royal honey.jpg".to_string());
                }

                Ok(results)
            });

        let response: SearchResponse = TestClient::get("http://example.com/search?q=honey")
            .send(&make_service(app))
            .await
            .take_json()
            .await?;

        let names: Vec<&str> = response
            .products
            .iter()
            .map(|p| p.product.name.as_str())
            .collect();

        assert_eq!(names, ["Royal Honey", "Wild Honey"]);
        assert_eq!(response.total_results, response.products.len());
        assert_eq!(
            response.products[0].product.image_url.as_deref(),
            Some("http://example.com/media/products/royal%20honey.jpg")
        );

        Ok(())
    }
}
