//! Repository for the `activity_logs` table.
//!
//! Writes here come from the fire-and-forget recorder in the API layer, so
//! insert failures must never bubble into request handling.

use sqlx::PgPool;

use crate::models::activity::{ActivityLog, ActivityLogWithRefsRow, CreateActivityLog};

const COLUMNS: &str = "id, user_id, action, details, lead_id, created_at";

pub struct ActivityLogRepo;

impl ActivityLogRepo {
    /// Append one log entry.
    pub async fn insert(
        pool: &PgPool,
        input: &CreateActivityLog,
    ) -> Result<ActivityLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO activity_logs (user_id, action, details, lead_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ActivityLog>(&query)
            .bind(input.user_id)
            .bind(&input.action)
            .bind(&input.details)
            .bind(input.lead_id)
            .fetch_one(pool)
            .await
    }

    /// List one page of logs with actor and lead populated, newest first.
    ///
    /// Both joins are LEFT JOINs over loose references; entries survive the
    /// deletion of the user or lead they point at.
    pub async fn list(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ActivityLogWithRefsRow>, sqlx::Error> {
        sqlx::query_as::<_, ActivityLogWithRefsRow>(
            "SELECT a.id, a.user_id, a.action, a.details, a.lead_id, a.created_at,
                    u.name AS user_name, u.email AS user_email,
                    l.name AS lead_name, l.email AS lead_email
             FROM activity_logs a
             LEFT JOIN users u ON u.id = a.user_id
             LEFT JOIN leads l ON l.id = a.lead_id
             ORDER BY a.created_at DESC
             LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
    }

    /// Count all log entries.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*)::BIGINT FROM activity_logs")
            .fetch_one(pool)
            .await
    }
}
