//! Route definitions for the `/comment` resource.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::comments;
use crate::state::AppState;

/// Routes mounted at `/comment`. All require an authenticated, active user.
///
/// Edit and delete additionally require being the comment's author
/// (enforced in the handlers).
///
/// ```text
/// POST   /add/{leadId}         -> add_comment
/// GET    /{leadId}/comments    -> list_comments (?page, ?limit)
/// PUT    /edit/{commentId}     -> edit_comment
/// DELETE /delete/{commentId}   -> delete_comment
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/add/{lead_id}", post(comments::add_comment))
        .route("/{lead_id}/comments", get(comments::list_comments))
        .route("/edit/{comment_id}", put(comments::edit_comment))
        .route("/delete/{comment_id}", delete(comments::delete_comment))
}
