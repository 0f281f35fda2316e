//! Repository for the `roles` table.
//!
//! The table is seed-only: the three rows inserted by the roles migration
//! are never mutated at runtime, so only read paths exist here.

use std::collections::HashMap;

use leadhub_core::types::DbId;
use sqlx::PgPool;

use crate::models::role::Role;

/// Read operations over the seeded role set.
pub struct RoleRepo;

impl RoleRepo {
    /// Look up a role by its client-facing name (case-sensitive).
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Role>, sqlx::Error> {
        sqlx::query_as::<_, Role>(
            "SELECT id, name, description, created_at, updated_at FROM roles WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(pool)
        .await
    }

    /// Resolve a role id to its name. Ids with no row resolve to `"unknown"`.
    pub async fn resolve_name(pool: &PgPool, role_id: DbId) -> Result<String, sqlx::Error> {
        let name = sqlx::query_scalar::<_, String>("SELECT name FROM roles WHERE id = $1")
            .bind(role_id)
            .fetch_optional(pool)
            .await?;
        Ok(name.unwrap_or_else(|| "unknown".to_string()))
    }

    /// Fetch the whole id -> name mapping in one query, for endpoints that
    /// attach role names to a batch of user rows.
    pub async fn name_map(pool: &PgPool) -> Result<HashMap<DbId, String>, sqlx::Error> {
        let rows = sqlx::query_as::<_, (DbId, String)>("SELECT id, name FROM roles")
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().collect())
    }
}
