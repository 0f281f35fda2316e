//! Route definitions for the activity log.

use axum::routing::get;
use axum::Router;

use crate::handlers::activity;
use crate::state::AppState;

/// Activity log routes, mounted directly under `/api`.
///
/// ```text
/// GET  /activity-log   -> list_activity_logs (superAdmin only; ?page, ?limit)
/// POST /activity-log   -> create_activity_log
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/activity-log",
        get(activity::list_activity_logs).post(activity::create_activity_log),
    )
}
