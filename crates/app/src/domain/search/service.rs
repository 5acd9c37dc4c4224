//! Search service.

use async_trait::async_trait;
use mockall::automock;
use tracing::debug;

use crate::{
    database::Db,
    domain::{
        categories::repository::PgCategoriesRepository,
        products::repository::{CandidateQuery, PgProductsRepository},
        search::{
            autocomplete::{self, Autocomplete, CATEGORY_SUGGESTIONS, PRODUCT_SUGGESTIONS},
            errors::SearchServiceError,
            filters::{SearchFilters, contains_pattern, text_patterns},
            pagination::{paginate, parse_page},
            query::SearchQuery,
            records::{ScoredProduct, SearchResults},
            scoring::relevance_score,
            statistics::{
                POPULAR_CATEGORIES, POPULAR_SEARCHES, SearchStatistics, TRENDING_PRODUCTS,
            },
        },
    },
};

/// A keyword search as received from a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub filters: SearchFilters,

    /// Requested page number, unparsed.
    pub page: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PgSearchService {
    db: Db,
    products: PgProductsRepository,
    categories: PgCategoriesRepository,
}

impl PgSearchService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            products: PgProductsRepository::new(),
            categories: PgCategoriesRepository::new(),
        }
    }
}

#[async_trait]
impl SearchService for PgSearchService {
    async fn search(&self, request: SearchRequest) -> Result<SearchResults, SearchServiceError> {
        let query = SearchQuery::parse(&request.query)?;
        let page = parse_page(request.page.as_deref());

        let mut tx = self.db.begin_read_transaction().await?;

        let category = match request.filters.category_slug() {
            Some(slug) => {
                let category = self.categories.find_category_by_slug(&mut tx, slug).await?;

                if category.is_none() {
                    debug!(category = slug, "ignoring unknown category filter");
                }

                category.map(|category| category.uuid)
            }
            None => None,
        };

        let candidates = CandidateQuery {
            category,
            min_price: request.filters.min_price(),
            max_price: request.filters.max_price(),
            patterns: text_patterns(&query),
        };

        let products = self.products.find_candidates(&mut tx, &candidates).await?;

        tx.commit().await?;

        let scored: Vec<ScoredProduct> = products
            .into_iter()
            .map(|product| ScoredProduct {
                relevance_score: relevance_score(&product, &query),
                product,
            })
            .collect();

        let page = paginate(scored, page, |scored| scored.relevance_score);

        debug!(
            query = query.phrase(),
            total_results = page.total_results,
            page = page.current_page,
            "search completed"
        );

        Ok(SearchResults {
            query: query.phrase().to_string(),
            total_results: page.total_results,
            total_pages: page.total_pages,
            current_page: page.current_page,
            products: page.items,
            filters: request.filters,
        })
    }

    async fn autocomplete(&self, query: &str) -> Result<Autocomplete, SearchServiceError> {
        let query = autocomplete::normalize_query(query);

        if !autocomplete::is_suggestible(&query) {
            return Ok(Autocomplete {
                query,
                suggestions: Vec::new(),
            });
        }

        let pattern = contains_pattern(&query);

        let mut tx = self.db.begin_read_transaction().await?;

        let products = self
            .products
            .suggest_products(&mut tx, &pattern, PRODUCT_SUGGESTIONS)
            .await?;

        let categories = self
            .categories
            .suggest_categories(&mut tx, &pattern, CATEGORY_SUGGESTIONS)
            .await?;

        tx.commit().await?;

        let suggestions = autocomplete::assemble(&query, products, categories);

        Ok(Autocomplete { query, suggestions })
    }

    async fn statistics(&self) -> Result<SearchStatistics, SearchServiceError> {
        let mut tx = self.db.begin_read_transaction().await?;

        let trending_products = self
            .products
            .recent_products(&mut tx, TRENDING_PRODUCTS)
            .await?;

        let popular_categories = self
            .categories
            .popular_categories(&mut tx, POPULAR_CATEGORIES)
            .await?;

        tx.commit().await?;

        Ok(SearchStatistics {
            trending_products,
            popular_categories,
            popular_searches: POPULAR_SEARCHES.to_vec(),
        })
    }
}

#[automock]
#[async_trait]
pub trait SearchService: Send + Sync {
    /// Runs a keyword search and returns the requested page, best matches first.
    async fn search(&self, request: SearchRequest) -> Result<SearchResults, SearchServiceError>;

    /// Suggests products, categories and curated terms for a partial query.
    async fn autocomplete(&self, query: &str) -> Result<Autocomplete, SearchServiceError>;

    /// Trending products, popular categories and popular search terms.
    async fn statistics(&self) -> Result<SearchStatistics, SearchServiceError>;
}
