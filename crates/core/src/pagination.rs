//! Page-based pagination helpers.
//!
//! This module lives in `core` (zero internal deps) so it can be used by both
//! the API/repository layer and any future CLI or worker tooling.
//!
//! List endpoints take 1-based `page` / `limit` query parameters. Out-of-range
//! or absent values degrade to defaults instead of failing.

/// First page. Anything below clamps up to this.
pub const DEFAULT_PAGE: i64 = 1;

/// Default number of items per page.
pub const DEFAULT_LIST_LIMIT: i64 = 10;

/// Maximum number of items per page.
pub const MAX_LIST_LIMIT: i64 = 100;

/// Clamp a user-provided page number to 1-based.
pub fn normalize_page(page: Option<i64>) -> i64 {
    page.unwrap_or(DEFAULT_PAGE).max(DEFAULT_PAGE)
}

/// Clamp a user-provided limit to `[1, max]`, falling back to `default`.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Row offset for a 1-based page.
pub fn page_offset(page: i64, limit: i64) -> i64 {
    (page - 1) * limit
}

/// Number of pages needed for `total` rows at `limit` rows per page.
pub fn total_pages(total: i64, limit: i64) -> i64 {
    if total == 0 {
        0
    } else {
        (total + limit - 1) / limit
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
