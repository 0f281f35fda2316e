//! Handlers for the `/comment` resource.
//!
//! Comments hang off a lead and are owned by their author: only the creator
//! can edit or delete one. References are loose, so a comment survives the
//! deletion of its lead or author.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use leadhub_core::activity::ActivityAction;
use leadhub_core::error::CoreError;
use leadhub_core::pagination::{self, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use leadhub_core::types::DbId;
use leadhub_db::models::comment::CommentResponse;
use leadhub_db::repositories::CommentRepo;

use crate::activity::record_activity;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireActive;
use crate::query::PageParams;
use crate::response::MessageResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /comment/add/{leadId}`.
#[derive(Debug, Deserialize)]
pub struct AddCommentRequest {
    pub content: String,
}

/// Request body for `PUT /comment/edit/{commentId}`.
#[derive(Debug, Deserialize)]
pub struct EditCommentRequest {
    pub text: String,
}

/// Mutation body carrying the affected comment with its author populated.
#[derive(Debug, Serialize)]
pub struct CommentEnvelope {
    pub message: String,
    pub comment: CommentResponse,
}

/// Body for `GET /comment/{leadId}/comments`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentListResponse {
    pub comments: Vec<CommentResponse>,
    pub total_comments: i64,
    pub total_pages: i64,
    pub current_page: i64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/comment/add/{leadId}
pub async fn add_comment(
    RequireActive(auth): RequireActive,
    State(state): State<AppState>,
    Path(lead_id): Path<DbId>,
    Json(input): Json<AddCommentRequest>,
) -> AppResult<(StatusCode, Json<CommentEnvelope>)> {
    if input.content.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Comment content cannot be empty".into(),
        ));
    }

    let created = CommentRepo::create(&state.pool, lead_id, auth.user_id, &input.content).await?;
    let comment = fetch_populated(&state, created.id).await?;

    record_activity(
        &state.pool,
        auth.user_id,
        ActivityAction::Created,
        Some(lead_id),
        "Comment Created",
    );
    tracing::info!(comment_id = created.id, lead_id, user_id = auth.user_id, "Comment added");

    Ok((
        StatusCode::CREATED,
        Json(CommentEnvelope {
            message: "Comment added successfully!".into(),
            comment,
        }),
    ))
}

/// GET /api/comment/{leadId}/comments
///
/// One page of a lead's comments with authors, newest first.
pub async fn list_comments(
    RequireActive(_auth): RequireActive,
    State(state): State<AppState>,
    Path(lead_id): Path<DbId>,
    Query(params): Query<PageParams>,
) -> AppResult<Json<CommentListResponse>> {
    let page = pagination::normalize_page(params.page);
    let limit = pagination::clamp_limit(params.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
    let offset = pagination::page_offset(page, limit);

    let rows = CommentRepo::list_for_lead(&state.pool, lead_id, limit, offset).await?;
    let total_comments = CommentRepo::count_for_lead(&state.pool, lead_id).await?;

    Ok(Json(CommentListResponse {
        comments: rows.into_iter().map(CommentResponse::from).collect(),
        total_comments,
        total_pages: pagination::total_pages(total_comments, limit),
        current_page: page,
    }))
}

/// PUT /api/comment/edit/{commentId}
///
/// Creator-only content edit.
pub async fn edit_comment(
    RequireActive(auth): RequireActive,
    State(state): State<AppState>,
    Path(comment_id): Path<DbId>,
    Json(input): Json<EditCommentRequest>,
) -> AppResult<Json<CommentEnvelope>> {
    if input.text.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Comment content cannot be empty".into(),
        ));
    }

    let existing = CommentRepo::find_by_id(&state.pool, comment_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Comment",
            id: comment_id,
        }))?;
    if existing.creator_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "You can only edit your own comments".into(),
        )));
    }

    CommentRepo::update_content(&state.pool, comment_id, &input.text)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Comment",
            id: comment_id,
        }))?;
    let comment = fetch_populated(&state, comment_id).await?;

    record_activity(
        &state.pool,
        auth.user_id,
        ActivityAction::Updated,
        Some(existing.lead_id),
        "Comment Updated",
    );
    tracing::info!(comment_id, user_id = auth.user_id, "Comment updated");

    Ok(Json(CommentEnvelope {
        message: "Comment updated successfully".into(),
        comment,
    }))
}

/// DELETE /api/comment/delete/{commentId}
///
/// Creator-only hard delete.
pub async fn delete_comment(
    RequireActive(auth): RequireActive,
    State(state): State<AppState>,
    Path(comment_id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    let existing = CommentRepo::find_by_id(&state.pool, comment_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Comment",
            id: comment_id,
        }))?;
    if existing.creator_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "You can only delete your own comments".into(),
        )));
    }

    CommentRepo::delete(&state.pool, comment_id).await?;

    record_activity(
        &state.pool,
        auth.user_id,
        ActivityAction::Deleted,
        Some(existing.lead_id),
        "Comment Deleted",
    );
    tracing::info!(comment_id, user_id = auth.user_id, "Comment deleted");

    Ok(Json(MessageResponse::new("Comment deleted successfully")))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Fetch a comment with its author populated, after a mutation.
async fn fetch_populated(state: &AppState, comment_id: DbId) -> AppResult<CommentResponse> {
    let row = CommentRepo::find_with_author(&state.pool, comment_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Comment",
            id: comment_id,
        }))?;
    Ok(CommentResponse::from(row))
}
