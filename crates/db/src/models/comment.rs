//! Comment entity model and DTOs.

use leadhub_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Raw comment row from the `comments` table.
#[derive(Debug, Clone, FromRow)]
pub struct Comment {
    pub id: DbId,
    pub content: String,
    pub lead_id: DbId,
    pub creator_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Public fields of a comment author.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentAuthor {
    pub id: DbId,
    pub name: String,
    pub photo_url: Option<String>,
    pub role: String,
}

/// Comment with its author populated, as returned by the API.
/// `creator` is `None` when the authoring user has been deleted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: DbId,
    pub content: String,
    pub lead_id: DbId,
    pub creator: Option<CommentAuthor>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Joined row backing [`CommentResponse`]; author columns are nullable
/// because the user reference is loose.
#[derive(Debug, Clone, FromRow)]
pub struct CommentWithAuthorRow {
    pub id: DbId,
    pub content: String,
    pub lead_id: DbId,
    pub creator_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub author_name: Option<String>,
    pub author_photo_url: Option<String>,
    pub author_role: Option<String>,
}

impl From<CommentWithAuthorRow> for CommentResponse {
    fn from(row: CommentWithAuthorRow) -> Self {
        let creator = row.author_name.map(|name| CommentAuthor {
            id: row.creator_id,
            name,
            photo_url: row.author_photo_url,
            role: row.author_role.unwrap_or_else(|| "unknown".to_string()),
        });
        CommentResponse {
            id: row.id,
            content: row.content,
            lead_id: row.lead_id,
            creator,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
