//! Search Records

use crate::domain::{products::records::ProductRecord, search::filters::SearchFilters};

/// A candidate product with its relevance score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredProduct {
    pub product: ProductRecord,
    pub relevance_score: u64,
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResults {
    /// The trimmed query.
    pub query: String,
    pub total_results: usize,
    pub total_pages: usize,
    pub current_page: u64,
    pub products: Vec<ScoredProduct>,
    pub filters: SearchFilters,
}
