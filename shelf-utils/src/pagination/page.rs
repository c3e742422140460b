//! Pure pagination math and page-window shaping helpers.

use std::ops::Range;

use shelf_core::{PageKey, PageResult};

use super::PAGE_SIZE_OPTIONS;

/// Compute the number of pages for a paginated list.
pub fn total_pages(item_count: usize, per_page: usize) -> usize {
    item_count.div_ceil(per_page.max(1))
}

/// Return the row range for a zero-based page index.
///
/// Indices past the end produce an empty range at `total_items`.
pub fn page_window(total_items: usize, per_page: usize, page_index: usize) -> Range<usize> {
    let safe_per_page = per_page.max(1);
    let start = page_index.saturating_mul(safe_per_page).min(total_items);
    let end = start.saturating_add(safe_per_page).min(total_items);
    start..end
}

/// Slice `rows` for `key` into a page result.
pub fn slice_page<R: Clone>(rows: &[R], key: PageKey) -> PageResult<R> {
    let window = page_window(rows.len(), key.page_size, key.page_index);
    PageResult::new(
        rows[window].to_vec(),
        total_pages(rows.len(), key.page_size),
    )
}

/// Parse a one-based "go to page" input into the index handed to `set_page_index`.
///
/// Empty input targets the first page. Values below 1 produce negative indices, which
/// the paginator clamps to 0. Returns `None` when the input is not a number.
pub fn parse_one_based_page(raw: Option<&str>) -> Option<i64> {
    match raw.map(str::trim) {
        Some(value) if !value.is_empty() => value
            .parse::<i64>()
            .ok()
            .map(|page| page.saturating_sub(1)),
        _ => Some(0),
    }
}

/// Parse a page-size choice, accepting only the offered options.
pub fn parse_page_size_option(raw: &str) -> Option<usize> {
    raw.trim()
        .parse::<usize>()
        .ok()
        .filter(|size| PAGE_SIZE_OPTIONS.contains(size))
}
