//! Shared query parameter types for API handlers.
//!
//! Common query structs that appear across multiple handler modules are
//! extracted here to avoid duplication.

use serde::Deserialize;

/// Generic pagination parameters (`?page=&limit=`).
///
/// Used by any handler that supports paginated listing. Values are
/// normalized in `leadhub_core::pagination` -- out-of-range or absent
/// values degrade to defaults rather than failing.
#[derive(Debug, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Pagination plus the lead list's free-text search term.
#[derive(Debug, Deserialize)]
pub struct LeadListParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
}
