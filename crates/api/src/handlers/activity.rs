//! Handlers for the `/activity-log` resource.
//!
//! Listing is superAdmin-only. Most entries are written by the
//! fire-and-forget recorder; the POST endpoint exists for manual entries
//! (e.g. assignment notes from other tooling).

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use leadhub_core::pagination::{self, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use leadhub_core::types::DbId;
use leadhub_core::validation::validate_activity_action;
use leadhub_db::models::activity::{ActivityLog, ActivityLogResponse, CreateActivityLog};
use leadhub_db::repositories::ActivityLogRepo;

use crate::error::AppResult;
use crate::middleware::rbac::{RequireActive, RequireSuperAdmin};
use crate::query::PageParams;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /activity-log`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateActivityLogRequest {
    pub user_id: DbId,
    #[validate(custom(function = validate_activity_action))]
    pub action: String,
    pub lead_id: Option<DbId>,
    pub details: Option<String>,
}

/// Body for `GET /activity-log`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLogListResponse {
    pub logs: Vec<ActivityLogResponse>,
    pub total_logs: i64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/activity-log
///
/// One page of audit entries with actor and lead populated, newest first.
pub async fn list_activity_logs(
    RequireSuperAdmin(_admin): RequireSuperAdmin,
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> AppResult<Json<ActivityLogListResponse>> {
    let page = pagination::normalize_page(params.page);
    let limit = pagination::clamp_limit(params.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
    let offset = pagination::page_offset(page, limit);

    let rows = ActivityLogRepo::list(&state.pool, limit, offset).await?;
    let total_logs = ActivityLogRepo::count(&state.pool).await?;

    Ok(Json(ActivityLogListResponse {
        logs: rows.into_iter().map(ActivityLogResponse::from).collect(),
        total_logs,
    }))
}

/// POST /api/activity-log
///
/// Write one manual entry, returning the raw row.
pub async fn create_activity_log(
    RequireActive(_auth): RequireActive,
    State(state): State<AppState>,
    Json(input): Json<CreateActivityLogRequest>,
) -> AppResult<(StatusCode, Json<ActivityLog>)> {
    input.validate()?;

    let log = ActivityLogRepo::insert(
        &state.pool,
        &CreateActivityLog {
            user_id: input.user_id,
            action: input.action,
            details: input.details.unwrap_or_default(),
            lead_id: input.lead_id,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(log)))
}
