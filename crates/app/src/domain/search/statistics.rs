//! Storefront search statistics.

use crate::domain::{categories::records::CategoryCountRecord, products::records::ProductRecord};

/// Newest available products shown as trending.
pub const TRENDING_PRODUCTS: i64 = 10;

/// Categories ranked by product count.
pub const POPULAR_CATEGORIES: i64 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopularSearch {
    pub term: &'static str,
    pub count: u32,
}

/// Fixed search terms; no search analytics are recorded.
pub const POPULAR_SEARCHES: [PopularSearch; 5] = [
    PopularSearch {
        term: "আজওয়া খেজুর",
        count: 125,
    },
    PopularSearch {
        term: "পাহাড়ি মধু",
        count: 98,
    },
    PopularSearch {
        term: "কিচমিচ",
        count: 76,
    },
    PopularSearch {
        term: "আখরোট",
        count: 65,
    },
    PopularSearch {
        term: "চেরি ফল",
        count: 54,
    },
];

#[derive(Debug, Clone, PartialEq)]
pub struct SearchStatistics {
    pub trending_products: Vec<ProductRecord>,
    pub popular_categories: Vec<CategoryCountRecord>,
    pub popular_searches: Vec<PopularSearch>,
}
