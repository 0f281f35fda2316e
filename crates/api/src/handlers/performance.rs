//! Handler for the `/performance` resource.
//!
//! Read-only: the rollup rows are maintained by an external reporting job,
//! and the API only exposes them to superAdmins.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use leadhub_db::models::performance::AgentPerformanceResponse;
use leadhub_db::repositories::AgentPerformanceRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireSuperAdmin;
use crate::state::AppState;

/// Body for `GET /performance`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceResponse {
    pub agent_performance: Vec<AgentPerformanceResponse>,
    pub message: String,
}

/// GET /api/performance
///
/// Every rollup row with its agent populated, newest first.
pub async fn list_performance(
    RequireSuperAdmin(_admin): RequireSuperAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<PerformanceResponse>> {
    let rows = AgentPerformanceRepo::list(&state.pool).await?;

    Ok(Json(PerformanceResponse {
        agent_performance: rows.into_iter().map(AgentPerformanceResponse::from).collect(),
        message: "PerformanceFetched".into(),
    }))
}
