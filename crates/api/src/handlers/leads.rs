//! Handlers for the `/lead` resource.
//!
//! Every mutation leaves exactly one audit entry carrying the lead id.
//! List responses are populated: tags embedded, assignee as a summary.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use leadhub_core::activity::ActivityAction;
use leadhub_core::error::CoreError;
use leadhub_core::pagination::{self, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use leadhub_core::types::DbId;
use leadhub_core::validation::{
    validate_lead_source, validate_lead_status, MIN_NAME_LEN, NAME_RE, PHONE_RE,
};
use leadhub_db::models::lead::{CreateLead, LeadResponse, UpdateLead};
use leadhub_db::repositories::LeadRepo;

use crate::activity::record_activity;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireActive;
use crate::query::LeadListParams;
use crate::response::MessageResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /lead/leads`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLeadRequest {
    #[validate(
        regex(path = *NAME_RE, message = "Name must only contain letters and spaces"),
        length(min = MIN_NAME_LEN, message = "Name must be at least 3 characters long")
    )]
    pub name: String,
    #[validate(email(message = "Email must be a valid email address"))]
    pub email: String,
    #[validate(regex(path = *PHONE_RE, message = "Phone number must be exactly 10 digits"))]
    pub phone: String,
    #[validate(custom(function = validate_lead_source))]
    pub source: String,
    /// Defaults to `New` when absent.
    #[validate(custom(function = validate_lead_status))]
    pub status: Option<String>,
    /// Tag ids to link; ids without a matching tag are silently skipped.
    #[serde(default)]
    pub tags: Vec<DbId>,
    #[serde(rename = "assignedTo")]
    pub assigned_to: Option<DbId>,
}

/// Request body for `PUT /lead/leads/{id}`. Omitted fields keep their
/// previous values; a present `tags` array replaces the tag set wholesale.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateLeadRequest {
    #[validate(
        regex(path = *NAME_RE, message = "Name must only contain letters and spaces"),
        length(min = MIN_NAME_LEN, message = "Name must be at least 3 characters long")
    )]
    pub name: Option<String>,
    #[validate(email(message = "Email must be a valid email address"))]
    pub email: Option<String>,
    #[validate(regex(path = *PHONE_RE, message = "Phone number must be exactly 10 digits"))]
    pub phone: Option<String>,
    #[validate(custom(function = validate_lead_source))]
    pub source: Option<String>,
    #[validate(custom(function = validate_lead_status))]
    pub status: Option<String>,
    #[serde(rename = "assignedTo")]
    pub assigned_to: Option<DbId>,
    pub tags: Option<Vec<DbId>>,
}

/// Request body for `PUT /lead/leads/{leadId}/status`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateLeadStatusRequest {
    #[validate(custom(function = validate_lead_status))]
    pub status: String,
}

/// Mutation body carrying the affected lead, fully populated.
#[derive(Debug, Serialize)]
pub struct LeadEnvelope {
    pub message: String,
    pub lead: LeadResponse,
}

/// Body for `GET /lead/leads`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadListResponse {
    pub message: String,
    pub leads: Vec<LeadResponse>,
    pub total_leads: i64,
}

/// Body for `GET /lead/leads/assigned/{userId}`.
#[derive(Debug, Serialize)]
pub struct AssignedLeadsResponse {
    pub message: String,
    pub leads: Vec<LeadResponse>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/lead/leads
///
/// Create a lead. `status` falls back to `New` when absent.
pub async fn create_lead(
    RequireActive(auth): RequireActive,
    State(state): State<AppState>,
    Json(input): Json<CreateLeadRequest>,
) -> AppResult<(StatusCode, Json<LeadEnvelope>)> {
    input.validate()?;

    let created = LeadRepo::create(
        &state.pool,
        &CreateLead {
            name: input.name,
            email: input.email,
            phone: input.phone,
            source: input.source,
            status: input.status,
            assigned_to: input.assigned_to,
            tags: input.tags,
        },
    )
    .await?;

    let lead = LeadRepo::find_with_refs(&state.pool, created.id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Lead",
            id: created.id,
        }))?;

    record_activity(
        &state.pool,
        auth.user_id,
        ActivityAction::Created,
        Some(created.id),
        "New Lead Created",
    );
    tracing::info!(lead_id = created.id, user_id = auth.user_id, "Lead created");

    Ok((
        StatusCode::CREATED,
        Json(LeadEnvelope {
            message: "Lead created successfully".into(),
            lead,
        }),
    ))
}

/// GET /api/lead/leads
///
/// One page of leads, newest first, optionally filtered by a
/// case-insensitive substring over name, email, and phone.
pub async fn list_leads(
    RequireActive(_auth): RequireActive,
    State(state): State<AppState>,
    Query(params): Query<LeadListParams>,
) -> AppResult<Json<LeadListResponse>> {
    let page = pagination::normalize_page(params.page);
    let limit = pagination::clamp_limit(params.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
    let offset = pagination::page_offset(page, limit);
    let search = params.search.as_deref();

    let rows = LeadRepo::list(&state.pool, search, limit, offset).await?;
    let total_leads = LeadRepo::count(&state.pool, search).await?;
    let leads = LeadRepo::populate(&state.pool, rows).await?;

    Ok(Json(LeadListResponse {
        message: "Leads fetched successfully".into(),
        leads,
        total_leads,
    }))
}

/// GET /api/lead/leads/{id}
pub async fn get_lead(
    RequireActive(_auth): RequireActive,
    State(state): State<AppState>,
    Path(lead_id): Path<DbId>,
) -> AppResult<Json<LeadEnvelope>> {
    let lead = LeadRepo::find_with_refs(&state.pool, lead_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Lead",
            id: lead_id,
        }))?;

    Ok(Json(LeadEnvelope {
        message: "Lead fetched successfully".into(),
        lead,
    }))
}

/// PUT /api/lead/leads/{id}
///
/// Partial update; omitted fields keep their previous values.
pub async fn update_lead(
    RequireActive(auth): RequireActive,
    State(state): State<AppState>,
    Path(lead_id): Path<DbId>,
    Json(input): Json<UpdateLeadRequest>,
) -> AppResult<Json<LeadEnvelope>> {
    input.validate()?;

    LeadRepo::update(
        &state.pool,
        lead_id,
        &UpdateLead {
            name: input.name,
            email: input.email,
            phone: input.phone,
            source: input.source,
            status: input.status,
            assigned_to: input.assigned_to,
            tags: input.tags,
        },
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "Lead",
        id: lead_id,
    }))?;

    let lead = LeadRepo::find_with_refs(&state.pool, lead_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Lead",
            id: lead_id,
        }))?;

    record_activity(
        &state.pool,
        auth.user_id,
        ActivityAction::Updated,
        Some(lead_id),
        "Lead Updated",
    );
    tracing::info!(lead_id, user_id = auth.user_id, "Lead updated");

    Ok(Json(LeadEnvelope {
        message: "Lead updated successfully".into(),
        lead,
    }))
}

/// DELETE /api/lead/leads/{id}
///
/// Hard delete. Tag links die with the lead; comments and audit entries
/// referencing it stay behind with loose references.
pub async fn delete_lead(
    RequireActive(auth): RequireActive,
    State(state): State<AppState>,
    Path(lead_id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    let deleted = LeadRepo::delete(&state.pool, lead_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Lead",
            id: lead_id,
        }));
    }

    record_activity(
        &state.pool,
        auth.user_id,
        ActivityAction::Deleted,
        Some(lead_id),
        "Lead Deleted",
    );
    tracing::info!(lead_id, user_id = auth.user_id, "Lead deleted");

    Ok(Json(MessageResponse::new("Lead deleted successfully")))
}

/// GET /api/lead/leads/assigned/{userId}
///
/// Every lead assigned to one agent, unpaginated. A 404 when none exist.
pub async fn list_assigned_leads(
    RequireActive(_auth): RequireActive,
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<Json<AssignedLeadsResponse>> {
    let rows = LeadRepo::list_assigned(&state.pool, user_id).await?;
    if rows.is_empty() {
        return Err(AppError::NotFound("No leads found for this user".into()));
    }

    let leads = LeadRepo::populate(&state.pool, rows).await?;
    Ok(Json(AssignedLeadsResponse {
        message: "Leads fetched successfully".into(),
        leads,
    }))
}

/// PUT /api/lead/leads/{leadId}/status
///
/// Status-only update, the drag-and-drop pipeline path.
pub async fn update_lead_status(
    RequireActive(auth): RequireActive,
    State(state): State<AppState>,
    Path(lead_id): Path<DbId>,
    Json(input): Json<UpdateLeadStatusRequest>,
) -> AppResult<Json<LeadEnvelope>> {
    input.validate()?;

    LeadRepo::update_status(&state.pool, lead_id, &input.status)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Lead",
            id: lead_id,
        }))?;

    let lead = LeadRepo::find_with_refs(&state.pool, lead_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Lead",
            id: lead_id,
        }))?;

    record_activity(
        &state.pool,
        auth.user_id,
        ActivityAction::Updated,
        Some(lead_id),
        "Lead Status Updated",
    );
    tracing::info!(lead_id, status = %lead.status, user_id = auth.user_id, "Lead status updated");

    Ok(Json(LeadEnvelope {
        message: "Lead status updated successfully".into(),
        lead,
    }))
}
