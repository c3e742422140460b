//! Page request identity, page payloads, and the data source seam.

use async_trait::async_trait;

use crate::error::Result;

/// Identifies one page request by index and size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageKey {
    /// Zero-based page index.
    pub page_index: usize,
    /// Rows per page, at least 1.
    pub page_size: usize,
}

impl PageKey {
    pub fn new(page_index: usize, page_size: usize) -> Self {
        Self {
            page_index,
            page_size,
        }
    }
}

/// One resolved page: the row slice plus the page count it was computed against.
#[derive(Debug, Clone, PartialEq)]
pub struct PageResult<R> {
    pub rows: Vec<R>,
    pub page_count: usize,
}

impl<R> PageResult<R> {
    pub fn new(rows: Vec<R>, page_count: usize) -> Self {
        Self { rows, page_count }
    }
}

/// A source of pages, either in memory or remote.
///
/// Implementations must not cache: deduplication lives in the request cache.
#[async_trait]
pub trait PageSource: Send + Sync {
    type Row: Clone + Send + Sync + 'static;

    /// Produce the rows for `key` and the total page count at `key.page_size`.
    async fn fetch_page(&self, key: PageKey) -> Result<PageResult<Self::Row>>;
}
