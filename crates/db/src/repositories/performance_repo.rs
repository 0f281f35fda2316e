//! Repository for the `agent_performance` table.
//!
//! The API only reads these rollups; a reporting job owns the writes, so
//! there is no create/update surface here.

use sqlx::PgPool;

use crate::models::performance::AgentPerformanceWithUserRow;

pub struct AgentPerformanceRepo;

impl AgentPerformanceRepo {
    /// List every rollup with its agent populated, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<AgentPerformanceWithUserRow>, sqlx::Error> {
        sqlx::query_as::<_, AgentPerformanceWithUserRow>(
            "SELECT p.id, p.user_id, p.leads_handled, p.leads_converted,
                    p.avg_response_time, p.lead_statuses, p.created_at, p.updated_at,
                    u.name AS user_name, u.email AS user_email
             FROM agent_performance p
             LEFT JOIN users u ON u.id = p.user_id
             ORDER BY p.created_at DESC",
        )
        .fetch_all(pool)
        .await
    }
}
