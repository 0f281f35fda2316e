//! Repository for the `comments` table.
//!
//! Comments keep loose references: deleting a lead or user leaves its
//! comments behind, and the author join degrades to `None`.

use leadhub_core::types::DbId;
use sqlx::PgPool;

use crate::models::comment::{Comment, CommentWithAuthorRow};

const COLUMNS: &str = "id, content, lead_id, creator_id, created_at, updated_at";

/// Columns for the author-joined projection, aliased to match
/// [`CommentWithAuthorRow`].
const JOINED_COLUMNS: &str = "c.id, c.content, c.lead_id, c.creator_id, c.created_at, c.updated_at, \
     u.name AS author_name, u.photo_url AS author_photo_url, r.name AS author_role";

pub struct CommentRepo;

impl CommentRepo {
    /// Insert a comment on a lead.
    pub async fn create(
        pool: &PgPool,
        lead_id: DbId,
        creator_id: DbId,
        content: &str,
    ) -> Result<Comment, sqlx::Error> {
        let query = format!(
            "INSERT INTO comments (content, lead_id, creator_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(content)
            .bind(lead_id)
            .bind(creator_id)
            .fetch_one(pool)
            .await
    }

    /// Find a bare comment by ID (used for ownership checks).
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Comment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM comments WHERE id = $1");
        sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a comment with its author populated.
    pub async fn find_with_author(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<CommentWithAuthorRow>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM comments c
             LEFT JOIN users u ON u.id = c.creator_id
             LEFT JOIN roles r ON r.id = u.role_id
             WHERE c.id = $1"
        );
        sqlx::query_as::<_, CommentWithAuthorRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List one page of a lead's comments with authors, newest first.
    pub async fn list_for_lead(
        pool: &PgPool,
        lead_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<CommentWithAuthorRow>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM comments c
             LEFT JOIN users u ON u.id = c.creator_id
             LEFT JOIN roles r ON r.id = u.role_id
             WHERE c.lead_id = $1
             ORDER BY c.created_at DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, CommentWithAuthorRow>(&query)
            .bind(lead_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count a lead's comments, for pagination metadata.
    pub async fn count_for_lead(pool: &PgPool, lead_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*)::BIGINT FROM comments WHERE lead_id = $1")
            .bind(lead_id)
            .fetch_one(pool)
            .await
    }

    /// Replace a comment's content. Returns `None` if no row exists.
    pub async fn update_content(
        pool: &PgPool,
        id: DbId,
        content: &str,
    ) -> Result<Option<Comment>, sqlx::Error> {
        let query = format!(
            "UPDATE comments SET content = $2, updated_at = NOW() WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .bind(content)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete a comment.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
