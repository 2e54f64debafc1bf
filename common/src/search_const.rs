//! Constants shared by the query builder, the controller and the front ends.

/// Rows requested per page when nothing else is configured.
pub const PAGE_SIZE: u64 = 20;

/// Seconds before an outbound request is abandoned.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Pages on each side of the current one that stay visible in the pagination window.
pub const PAGINATION_WINDOW_RADIUS: u64 = 2;

pub const FIRST_YEAR_OF_ENTRY: u32 = 1998;
pub const LAST_YEAR_OF_ENTRY: u32 = 2026;
