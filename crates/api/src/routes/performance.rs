//! Route definitions for the agent performance dashboard.

use axum::routing::get;
use axum::Router;

use crate::handlers::performance;
use crate::state::AppState;

/// Performance routes, mounted directly under `/api`.
///
/// ```text
/// GET /performance   -> list_performance (superAdmin only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/performance", get(performance::list_performance))
}
