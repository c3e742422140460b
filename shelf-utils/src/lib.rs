/// Pagination state machine, request cache, and view helpers.
pub mod pagination;
