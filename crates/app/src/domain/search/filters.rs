//! Candidate filter inputs.

use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::debug;

use crate::domain::search::query::SearchQuery;

/// Filters as supplied by the caller. Echoed back verbatim with results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilters {
    /// Category slug.
    pub category: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
}

impl SearchFilters {
    /// The category slug, when one was given.
    pub fn category_slug(&self) -> Option<&str> {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|slug| !slug.is_empty())
    }

    /// Lower price bound, ignoring values that are not numbers.
    pub fn min_price(&self) -> Option<Decimal> {
        parse_price_bound("min_price", self.min_price.as_deref())
    }

    /// Upper price bound, ignoring values that are not numbers.
    pub fn max_price(&self) -> Option<Decimal> {
        parse_price_bound("max_price", self.max_price.as_deref())
    }
}

fn parse_price_bound(name: &str, raw: Option<&str>) -> Option<Decimal> {
    let raw = raw.map(str::trim).filter(|raw| !raw.is_empty())?;

    let parsed = Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok();

    if parsed.is_none() {
        debug!(filter = name, value = raw, "ignoring unparseable price bound");
    }

    parsed
}

/// Escape `LIKE` metacharacters so `term` only matches literally.
pub(crate) fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());

    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }

        escaped.push(c);
    }

    escaped
}

/// `ILIKE` pattern matching `term` anywhere in a value.
pub(crate) fn contains_pattern(term: &str) -> String {
    format!("%{}%", escape_like(term))
}

/// One `ILIKE` pattern per match term of `query`.
pub(crate) fn text_patterns(query: &SearchQuery) -> Vec<String> {
    query
        .match_terms()
        .into_iter()
        .map(contains_pattern)
        .collect()
}
