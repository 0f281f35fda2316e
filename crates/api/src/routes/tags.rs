//! Route definitions for the `/tag` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::tags;
use crate::state::AppState;

/// Routes mounted at `/tag`. All require an authenticated, active user;
/// deletion is restricted to superAdmin (enforced in the handler).
///
/// ```text
/// POST   /tags        -> create_tag
/// GET    /tags        -> list_tags (?page, ?limit)
/// GET    /tags/{id}   -> get_tag
/// PUT    /tags/{id}   -> update_tag
/// DELETE /tags/{id}   -> delete_tag (superAdmin only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/tags", get(tags::list_tags).post(tags::create_tag))
        .route(
            "/tags/{id}",
            get(tags::get_tag).put(tags::update_tag).delete(tags::delete_tag),
        )
}
