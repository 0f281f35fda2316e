//! Route definitions for the `/user` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/user`.
///
/// Admin-only routes are enforced by handler extractors, not here.
///
/// ```text
/// POST   /register          -> register (public, stages an OTP)
/// POST   /verify-otp        -> verify_otp (public)
/// POST   /login             -> login (public)
/// GET    /logout            -> logout (public)
/// POST   /forgotpassword    -> forgot_password (public)
/// GET    /support-agents    -> list_support_agents (public)
/// GET    /profile           -> get_profile
/// PUT    /profile/update    -> update_profile (multipart)
/// POST   /create            -> create_user (superAdmin only)
/// GET    /                  -> list_users (superAdmin only)
/// PUT    /{id}              -> update_user (superAdmin only)
/// DELETE /{id}              -> delete_user (superAdmin only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(users::register))
        .route("/verify-otp", post(users::verify_otp))
        .route("/login", post(users::login))
        .route("/logout", get(users::logout))
        .route("/forgotpassword", post(users::forgot_password))
        .route("/support-agents", get(users::list_support_agents))
        .route("/profile", get(users::get_profile))
        .route("/profile/update", put(users::update_profile))
        .route("/create", post(users::create_user))
        .route("/", get(users::list_users))
        .route("/{id}", put(users::update_user).delete(users::delete_user))
}
