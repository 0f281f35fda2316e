//! Repository for the `tags` table.

use leadhub_core::types::DbId;
use sqlx::PgPool;

use crate::models::tag::Tag;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, created_at, updated_at";

/// Provides CRUD operations for tags.
pub struct TagRepo;

impl TagRepo {
    /// Insert a new tag, returning the created row.
    pub async fn create(pool: &PgPool, name: &str) -> Result<Tag, sqlx::Error> {
        let query = format!("INSERT INTO tags (name) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Tag>(&query)
            .bind(name)
            .fetch_one(pool)
            .await
    }

    /// Find a tag by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Tag>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tags WHERE id = $1");
        sqlx::query_as::<_, Tag>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a tag by exact name (case-sensitive).
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Tag>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tags WHERE name = $1");
        sqlx::query_as::<_, Tag>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// List one page of tags, most recently created first.
    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Tag>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM tags ORDER BY created_at DESC LIMIT $1 OFFSET $2");
        sqlx::query_as::<_, Tag>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count all tags (for pagination metadata).
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*)::BIGINT FROM tags")
            .fetch_one(pool)
            .await
    }

    /// Rename a tag. Returns `None` if no row with the given `id` exists.
    pub async fn update(pool: &PgPool, id: DbId, name: &str) -> Result<Option<Tag>, sqlx::Error> {
        let query = format!(
            "UPDATE tags SET name = $2, updated_at = NOW() WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tag>(&query)
            .bind(id)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete a tag. Junction rows in `lead_tags` die by FK cascade;
    /// the leads themselves are untouched.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tags WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
