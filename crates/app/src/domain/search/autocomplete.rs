//! Search-as-you-type suggestions.

use rustc_hash::FxHashSet;
use uuid::Uuid;

use crate::domain::{
    categories::records::CategoryRecord, products::repository::ProductNameRecord,
};

/// Queries shorter than this (in characters) get no suggestions.
pub const MIN_QUERY_CHARS: usize = 2;

pub const PRODUCT_SUGGESTIONS: i64 = 10;
pub const CATEGORY_SUGGESTIONS: i64 = 5;
pub const MAX_SUGGESTIONS: usize = 15;

/// Curated search terms offered alongside catalog matches.
pub const POPULAR_TERMS: [&str; 8] = [
    "খেজুর",
    "চেরি ফল",
    "কাট বাদাম",
    "দেশি বাদাম",
    "মধু",
    "কিচমিচ",
    "আখরোট",
    "হানি নাট",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionKind {
    Product,
    Category,
    Popular,
}

impl SuggestionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::Category => "category",
            Self::Popular => "popular",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub kind: SuggestionKind,
    pub name: String,
    pub slug: String,

    /// Catalog identifier; absent for curated terms.
    pub id: Option<Uuid>,

    /// Storefront path the suggestion navigates to.
    pub url: String,
}

/// Suggestions for a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Autocomplete {
    /// The trimmed, lowercased query.
    pub query: String,
    pub suggestions: Vec<Suggestion>,
}

/// Trim and lowercase a raw query.
pub fn normalize_query(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Whether `query` is long enough to look anything up.
pub fn is_suggestible(query: &str) -> bool {
    query.chars().count() >= MIN_QUERY_CHARS
}

/// Storefront search link for a curated term, with the term percent-encoded.
pub(crate) fn search_url(term: &str) -> String {
    format!("/search?q={}", urlencoding::encode(term))
}

/// Merge product and category matches with curated terms.
///
/// Names are emitted once, products first. The result holds at most
/// [`MAX_SUGGESTIONS`] entries.
pub(crate) fn assemble(
    query: &str,
    products: Vec<ProductNameRecord>,
    categories: Vec<CategoryRecord>,
) -> Vec<Suggestion> {
    let mut seen = FxHashSet::default();
    let mut suggestions = Vec::new();

    for product in products {
        if seen.insert(product.name.clone()) {
            let id = product.uuid.into_uuid();

            suggestions.push(Suggestion {
                kind: SuggestionKind::Product,
                url: format!("/product/{id}"),
                name: product.name,
                slug: product.slug,
                id: Some(id),
            });
        }
    }

    for category in categories {
        if seen.insert(category.name.clone()) {
            suggestions.push(Suggestion {
                kind: SuggestionKind::Category,
                url: format!("/category/{}", category.slug),
                name: category.name,
                slug: category.slug,
                id: Some(category.uuid.into_uuid()),
            });
        }
    }

    for term in POPULAR_TERMS {
        if term.to_lowercase().contains(query) && seen.insert(term.to_string()) {
            suggestions.push(Suggestion {
                kind: SuggestionKind::Popular,
                name: term.to_string(),
                slug: term.to_lowercase().replace(' ', "-"),
                id: None,
                url: search_url(term),
            });
        }
    }

    suggestions.truncate(MAX_SUGGESTIONS);

    suggestions
}
