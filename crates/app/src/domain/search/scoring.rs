//! Relevance scoring.

use crate::domain::{products::records::ProductRecord, search::query::SearchQuery};

pub const PHRASE_IN_NAME: u64 = 100;
pub const TOKEN_IN_NAME: u64 = 50;
pub const TOKEN_IN_DESCRIPTION: u64 = 20;
pub const TOKEN_IN_CATEGORY: u64 = 30;
pub const FEATURED_BONUS: u64 = 10;
pub const IN_STOCK_BONUS: u64 = 5;

/// Heuristic relevance of `product` to `query`. Higher is better.
///
/// Matching is case-insensitive substring matching. Every token counts,
/// short and repeated ones included.
pub fn relevance_score(product: &ProductRecord, query: &SearchQuery) -> u64 {
    let name = product.name.to_lowercase();
    let description = product.description.to_lowercase();
    let category = product.category.name.to_lowercase();

    let mut score = 0;

    if name.contains(&query.phrase().to_lowercase()) {
        score += PHRASE_IN_NAME;
    }

    for token in query.tokens() {
        let token = token.to_lowercase();

        if name.contains(&token) {
            score += TOKEN_IN_NAME;
        }

        if description.contains(&token) {
            score += TOKEN_IN_DESCRIPTION;
        }

        if category.contains(&token) {
            score += TOKEN_IN_CATEGORY;
        }
    }

    if product.featured {
        score += FEATURED_BONUS;
    }

    if product.in_stock() {
        score += IN_STOCK_BONUS;
    }

    score
}
