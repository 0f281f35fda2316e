pub mod activity;
pub mod comments;
pub mod health;
pub mod leads;
pub mod performance;
pub mod tags;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /user/register                 register with OTP verification (public)
/// /user/verify-otp               confirm OTP, create account (public)
/// /user/login                    login (public)
/// /user/logout                   logout (public)
/// /user/forgotpassword           reset password via security answer (public)
/// /user/support-agents           list support agents (public)
/// /user/profile                  own profile (requires auth)
/// /user/profile/update           update own name/photo (multipart)
/// /user/create                   create user (superAdmin only)
/// /user                          list users (superAdmin only)
/// /user/{id}                     update, delete user (superAdmin only)
///
/// /lead/leads                    list, create
/// /lead/leads/{id}               get, update, delete
/// /lead/leads/assigned/{userId}  leads assigned to a user
/// /lead/leads/{leadId}/status    update status (PUT)
///
/// /comment/add/{leadId}          add comment (POST)
/// /comment/{leadId}/comments     list comments for a lead
/// /comment/edit/{commentId}      edit own comment (PUT)
/// /comment/delete/{commentId}    delete own comment (DELETE)
///
/// /tag/tags                      list, create
/// /tag/tags/{id}                 get, update, delete (delete is superAdmin only)
///
/// /activity-log                  list logs (superAdmin), record manual entry (POST)
///
/// /performance                   per-agent conversion stats (superAdmin only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // User accounts: registration, sessions, admin management.
        .nest("/user", users::router())
        // Lead CRUD, assignment views, and status transitions.
        .nest("/lead", leads::router())
        // Comment threads attached to leads.
        .nest("/comment", comments::router())
        // Tag CRUD.
        .nest("/tag", tags::router())
        // Audit trail (superAdmin list + manual entries).
        .merge(activity::router())
        // Agent performance dashboard.
        .merge(performance::router())
}
