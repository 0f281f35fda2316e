//! Lead entity model and DTOs.

use leadhub_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::tag::Tag;
use crate::models::user::UserSummary;

/// Raw lead row from the `leads` table. `source` and `status` hold the
/// client-facing strings checked by the table constraints.
#[derive(Debug, Clone, FromRow)]
pub struct Lead {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub source: String,
    pub status: String,
    pub assigned_to: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Lead with tags and assignee populated, as returned by the API.
///
/// A deleted assignee populates as `None` rather than an error; a deleted tag
/// simply no longer appears in `tags`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadResponse {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub source: String,
    pub status: String,
    pub tags: Vec<Tag>,
    pub assigned_to: Option<UserSummary>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Minimal lead fields used when populating activity-log references.
#[derive(Debug, Clone, Serialize)]
pub struct LeadSummary {
    pub id: DbId,
    pub name: String,
    pub email: String,
}

/// Insert parameters for a new lead.
#[derive(Debug, Clone)]
pub struct CreateLead {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub source: String,
    /// Defaults to `New` when absent.
    pub status: Option<String>,
    pub assigned_to: Option<DbId>,
    /// Tag ids to link. Ids that do not exist are silently skipped.
    pub tags: Vec<DbId>,
}

/// Partial update: `None` keeps the previous value. The assignee cannot be
/// cleared through this path, matching the coalescing update semantics of
/// every other field.
#[derive(Debug, Clone, Default)]
pub struct UpdateLead {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub source: Option<String>,
    pub status: Option<String>,
    pub assigned_to: Option<DbId>,
    /// `Some` replaces the full tag set; `None` leaves links untouched.
    pub tags: Option<Vec<DbId>>,
}
