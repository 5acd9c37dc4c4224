//! Result pagination.

use std::cmp::Reverse;

/// Results per page.
pub const PAGE_SIZE: usize = 20;

/// One page of a sorted result list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_results: usize,
    pub total_pages: usize,
    pub current_page: u64,
}

/// Read a requested page number. Anything that is not a positive integer
/// means the first page.
pub fn parse_page(raw: Option<&str>) -> u64 {
    raw.and_then(|raw| raw.trim().parse::<u64>().ok())
        .filter(|page| *page >= 1)
        .unwrap_or(1)
}

/// Sort `items` by descending score and return page `page`.
///
/// The sort is stable, so items with equal scores keep their input order.
/// A page past the end is empty.
pub fn paginate<T>(mut items: Vec<T>, page: u64, score: impl Fn(&T) -> u64) -> Page<T> {
    items.sort_by_key(|item| Reverse(score(item)));

    let total_results = items.len();
    let total_pages = total_results.div_ceil(PAGE_SIZE);

    let start = usize::try_from(page.saturating_sub(1))
        .ok()
        .and_then(|index| index.checked_mul(PAGE_SIZE))
        .filter(|start| *start < total_results);

    let items = match start {
        Some(start) => {
            let end = (start + PAGE_SIZE).min(total_results);
            items.drain(start..end).collect()
        }
        None => Vec::new(),
    };

    Page {
        items,
        total_results,
        total_pages,
        current_page: page,
    }
}
