//! Agent performance rollup model. Read-only from the API; a reporting job
//! maintains the rows.

use leadhub_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::user::UserSummary;

/// Raw row from the `agent_performance` table. `lead_statuses` maps status
/// name to count (e.g. `{"New": 3, "Won": 1}`).
#[derive(Debug, Clone, FromRow)]
pub struct AgentPerformance {
    pub id: DbId,
    pub user_id: DbId,
    pub leads_handled: i64,
    pub leads_converted: i64,
    pub avg_response_time: f64,
    pub lead_statuses: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Rollup with the agent populated.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentPerformanceResponse {
    pub id: DbId,
    #[serde(rename = "userId")]
    pub user: Option<UserSummary>,
    pub leads_handled: i64,
    pub leads_converted: i64,
    pub avg_response_time: f64,
    pub lead_statuses: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Joined row backing [`AgentPerformanceResponse`].
#[derive(Debug, Clone, FromRow)]
pub struct AgentPerformanceWithUserRow {
    pub id: DbId,
    pub user_id: DbId,
    pub leads_handled: i64,
    pub leads_converted: i64,
    pub avg_response_time: f64,
    pub lead_statuses: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub user_name: Option<String>,
    pub user_email: Option<String>,
}

impl From<AgentPerformanceWithUserRow> for AgentPerformanceResponse {
    fn from(row: AgentPerformanceWithUserRow) -> Self {
        let user = match (row.user_name, row.user_email) {
            (Some(name), Some(email)) => Some(UserSummary {
                id: row.user_id,
                name,
                email,
            }),
            _ => None,
        };
        AgentPerformanceResponse {
            id: row.id,
            user,
            leads_handled: row.leads_handled,
            leads_converted: row.leads_converted,
            avg_response_time: row.avg_response_time,
            lead_statuses: row.lead_statuses,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
