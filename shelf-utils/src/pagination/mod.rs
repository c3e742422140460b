//! Stable facade for pagination helpers used by the table session.

pub use shelf_core::config::DEFAULT_PAGE_SIZE;

/// Page sizes offered to the user.
pub const PAGE_SIZE_OPTIONS: [usize; 5] = [10, 20, 30, 40, 50];

pub mod cache;
mod components;
mod page;
pub mod paginator;
mod view;

pub use cache::{
    CacheStats, CacheStatsSnapshot, LookupOptions, PageLookup, PageOutcome, PageRequestCache,
};
pub use components::{NavAction, NavControl, build_nav_controls, nav_control};
pub use page::{
    page_window, parse_one_based_page, parse_page_size_option, slice_page, total_pages,
};
pub use paginator::{
    Applied, PageCompletion, PageCount, PaginationState, Paginator, PaginatorOptions,
};
pub use view::{PageStatus, TableView};
