//! Activity log entity model and DTOs.

use leadhub_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::lead::LeadSummary;
use crate::models::user::UserSummary;

/// Raw activity log row. Append-only: there is no update DTO.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLog {
    pub id: DbId,
    pub user_id: DbId,
    pub action: String,
    pub details: String,
    pub lead_id: Option<DbId>,
    pub created_at: Timestamp,
}

/// Insert parameters for one log entry.
#[derive(Debug, Clone)]
pub struct CreateActivityLog {
    pub user_id: DbId,
    pub action: String,
    pub details: String,
    pub lead_id: Option<DbId>,
}

/// Log entry with actor and lead display fields populated. The reference
/// fields keep their raw names but carry the populated objects, so a deleted
/// actor or lead shows up as `null`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLogResponse {
    pub id: DbId,
    #[serde(rename = "userId")]
    pub user: Option<UserSummary>,
    pub action: String,
    pub details: String,
    #[serde(rename = "leadId")]
    pub lead: Option<LeadSummary>,
    pub created_at: Timestamp,
}

/// Joined row backing [`ActivityLogResponse`].
#[derive(Debug, Clone, FromRow)]
pub struct ActivityLogWithRefsRow {
    pub id: DbId,
    pub user_id: DbId,
    pub action: String,
    pub details: String,
    pub lead_id: Option<DbId>,
    pub created_at: Timestamp,
    pub user_name: Option<String>,
    pub user_email: Option<String>,
    pub lead_name: Option<String>,
    pub lead_email: Option<String>,
}

impl From<ActivityLogWithRefsRow> for ActivityLogResponse {
    fn from(row: ActivityLogWithRefsRow) -> Self {
        let user = match (row.user_name, row.user_email) {
            (Some(name), Some(email)) => Some(UserSummary {
                id: row.user_id,
                name,
                email,
            }),
            _ => None,
        };
        let lead = match (row.lead_id, row.lead_name, row.lead_email) {
            (Some(id), Some(name), Some(email)) => Some(LeadSummary { id, name, email }),
            _ => None,
        };
        ActivityLogResponse {
            id: row.id,
            user,
            action: row.action,
            details: row.details,
            lead,
            created_at: row.created_at,
        }
    }
}
