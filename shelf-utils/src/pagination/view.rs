//! Render-ready snapshot of a paginator.

use std::sync::Arc;

use shelf_core::{Error, PageResult};

use super::paginator::{PageCount, PaginationState};

/// Where the rows of a [`TableView`] came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageStatus {
    /// Rows belong to the current key.
    Ready,
    /// Rows belong to an earlier key; the current one is still resolving.
    Placeholder,
    /// Nothing to show yet.
    Loading,
    /// The current key failed; rows, if any, are from an earlier key.
    Failed(Error),
}

/// Everything the rendering layer needs for one frame.
#[derive(Debug, Clone)]
pub struct TableView<R> {
    page: Option<Arc<PageResult<R>>>,
    pub state: PaginationState,
    pub page_count: PageCount,
    pub status: PageStatus,
}

impl<R> TableView<R> {
    pub fn new(
        page: Option<Arc<PageResult<R>>>,
        state: PaginationState,
        page_count: PageCount,
        status: PageStatus,
    ) -> Self {
        Self {
            page,
            state,
            page_count,
            status,
        }
    }

    /// Rows to display; empty while loading.
    pub fn rows(&self) -> &[R] {
        match &self.page {
            Some(page) => &page.rows,
            None => &[],
        }
    }

    pub fn can_go_previous(&self) -> bool {
        self.state.page_index > 0
    }

    pub fn can_go_next(&self) -> bool {
        self.page_count
            .known()
            .is_some_and(|count| self.state.page_index + 1 < count)
    }

    /// Whether a resolution for the current key is still outstanding.
    pub fn is_fetching(&self) -> bool {
        matches!(self.status, PageStatus::Placeholder | PageStatus::Loading)
    }

    /// One-based "Page X of Y" footer; `?` while the count is unknown.
    pub fn footer_text(&self) -> String {
        let page = self.state.page_index + 1;
        match self.page_count.known() {
            Some(total) => format!("Page {page} of {total}"),
            None => format!("Page {page} of ?"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(page_index: usize, page_count: PageCount, rows: Option<Vec<u8>>) -> TableView<u8> {
        TableView::new(
            rows.map(|rows| Arc::new(PageResult::new(rows, page_count.known().unwrap_or(0)))),
            PaginationState {
                page_index,
                page_size: 10,
            },
            page_count,
            PageStatus::Ready,
        )
    }

    #[test]
    fn test_navigation_flags() {
        let first = view(0, PageCount::Known(3), Some(vec![1]));
        assert!(!first.can_go_previous());
        assert!(first.can_go_next());

        let last = view(2, PageCount::Known(3), Some(vec![1]));
        assert!(last.can_go_previous());
        assert!(!last.can_go_next());

        let unknown = view(0, PageCount::Unknown, None);
        assert!(!unknown.can_go_next());
        assert!(unknown.rows().is_empty());
    }

    #[test]
    fn test_footer_text() {
        assert_eq!(view(1, PageCount::Known(3), None).footer_text(), "Page 2 of 3");
        assert_eq!(view(0, PageCount::Unknown, None).footer_text(), "Page 1 of ?");
    }
}
