//! Handlers for the `/tag` resource.
//!
//! Tag names are globally unique. Deleting a tag detaches it from every
//! lead (junction rows cascade) but never touches the leads themselves.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use leadhub_core::activity::ActivityAction;
use leadhub_core::error::CoreError;
use leadhub_core::pagination::{self, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use leadhub_core::types::DbId;
use leadhub_core::validation::{MIN_NAME_LEN, NAME_RE};
use leadhub_db::models::tag::Tag;
use leadhub_db::repositories::TagRepo;

use crate::activity::record_activity;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireActive, RequireSuperAdmin};
use crate::query::PageParams;
use crate::response::MessageResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for tag create and rename.
#[derive(Debug, Deserialize, Validate)]
pub struct TagRequest {
    #[validate(
        regex(path = *NAME_RE, message = "Name must only contain letters and spaces"),
        length(min = MIN_NAME_LEN, message = "Name must be at least 3 characters long")
    )]
    pub name: String,
}

/// Mutation body carrying the affected tag.
#[derive(Debug, Serialize)]
pub struct TagEnvelope {
    pub message: String,
    pub tag: Tag,
}

/// Body for `GET /tag/tags`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagListResponse {
    pub message: String,
    pub tags: Vec<Tag>,
    pub total_tags: i64,
    pub current_page: i64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/tag/tags
pub async fn create_tag(
    RequireActive(auth): RequireActive,
    State(state): State<AppState>,
    Json(input): Json<TagRequest>,
) -> AppResult<(StatusCode, Json<TagEnvelope>)> {
    input.validate()?;

    // Pre-check for the friendly message; a concurrent insert that slips
    // past lands on uq_tags_name and is classified to the same body.
    if TagRepo::find_by_name(&state.pool, &input.name)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Tag already exists".into(),
        )));
    }

    let tag = TagRepo::create(&state.pool, &input.name).await?;

    record_activity(
        &state.pool,
        auth.user_id,
        ActivityAction::Created,
        None,
        "New Tag Created",
    );
    tracing::info!(tag_id = tag.id, user_id = auth.user_id, "Tag created");

    Ok((
        StatusCode::CREATED,
        Json(TagEnvelope {
            message: "Tag created successfully".into(),
            tag,
        }),
    ))
}

/// GET /api/tag/tags
///
/// One page of tags, newest first.
pub async fn list_tags(
    RequireActive(_auth): RequireActive,
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> AppResult<Json<TagListResponse>> {
    let page = pagination::normalize_page(params.page);
    let limit = pagination::clamp_limit(params.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
    let offset = pagination::page_offset(page, limit);

    let tags = TagRepo::list(&state.pool, limit, offset).await?;
    let total_tags = TagRepo::count(&state.pool).await?;

    Ok(Json(TagListResponse {
        message: "Tags fetched successfully".into(),
        tags,
        total_tags,
        current_page: page,
    }))
}

/// GET /api/tag/tags/{id}
pub async fn get_tag(
    RequireActive(_auth): RequireActive,
    State(state): State<AppState>,
    Path(tag_id): Path<DbId>,
) -> AppResult<Json<TagEnvelope>> {
    let tag = TagRepo::find_by_id(&state.pool, tag_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Tag",
            id: tag_id,
        }))?;

    Ok(Json(TagEnvelope {
        message: "Tag fetched successfully".into(),
        tag,
    }))
}

/// PUT /api/tag/tags/{id}
pub async fn update_tag(
    RequireActive(auth): RequireActive,
    State(state): State<AppState>,
    Path(tag_id): Path<DbId>,
    Json(input): Json<TagRequest>,
) -> AppResult<Json<TagEnvelope>> {
    input.validate()?;

    let tag = TagRepo::update(&state.pool, tag_id, &input.name)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Tag",
            id: tag_id,
        }))?;

    record_activity(
        &state.pool,
        auth.user_id,
        ActivityAction::Updated,
        None,
        "Tag Updated",
    );
    tracing::info!(tag_id, user_id = auth.user_id, "Tag updated");

    Ok(Json(TagEnvelope {
        message: "Tag updated successfully".into(),
        tag,
    }))
}

/// DELETE /api/tag/tags/{id}
///
/// SuperAdmin only. Junction rows cascade; leads are untouched.
pub async fn delete_tag(
    RequireSuperAdmin(admin): RequireSuperAdmin,
    State(state): State<AppState>,
    Path(tag_id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    let deleted = TagRepo::delete(&state.pool, tag_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Tag",
            id: tag_id,
        }));
    }

    record_activity(
        &state.pool,
        admin.user_id,
        ActivityAction::Deleted,
        None,
        "Tag Deleted",
    );
    tracing::info!(tag_id, user_id = admin.user_id, "Tag deleted");

    Ok(Json(MessageResponse::new("Tag deleted successfully")))
}
