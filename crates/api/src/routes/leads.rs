//! Route definitions for the `/lead` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::leads;
use crate::state::AppState;

/// Routes mounted at `/lead`. All require an authenticated, active user.
///
/// ```text
/// POST   /leads                    -> create_lead
/// GET    /leads                    -> list_leads (?page, ?limit, ?search)
/// GET    /leads/{id}               -> get_lead
/// PUT    /leads/{id}               -> update_lead
/// DELETE /leads/{id}               -> delete_lead
/// GET    /leads/assigned/{userId}  -> list_assigned_leads
/// PUT    /leads/{leadId}/status    -> update_lead_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/leads", get(leads::list_leads).post(leads::create_lead))
        .route(
            "/leads/{id}",
            get(leads::get_lead)
                .put(leads::update_lead)
                .delete(leads::delete_lead),
        )
        .route("/leads/assigned/{user_id}", get(leads::list_assigned_leads))
        .route("/leads/{lead_id}/status", put(leads::update_lead_status))
}
