//! User entity model and DTOs.

use leadhub_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash and security answer -- NEVER serialize this to
/// API responses directly. Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role_id: DbId,
    pub security_answer: String,
    pub photo_url: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for API responses (no credentials).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: DbId,
    pub name: String,
    pub email: String,
    /// Resolved role name (e.g. `"superAdmin"`).
    pub role: String,
    pub photo_url: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
}

impl UserResponse {
    /// Build the external shape from a row and its resolved role name.
    pub fn from_user(user: User, role: String) -> Self {
        UserResponse {
            id: user.id,
            name: user.name,
            email: user.email,
            role,
            photo_url: user.photo_url,
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

/// Minimal public user fields used when populating references
/// (lead assignees, activity actors, performance rows).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserSummary {
    pub id: DbId,
    pub name: String,
    pub email: String,
}

/// Insert parameters for a new user.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role_id: DbId,
    pub security_answer: String,
    pub is_active: bool,
}

/// Admin edit DTO. Activation changes go through the ops binary instead.
#[derive(Debug, Clone, Default)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role_id: Option<DbId>,
    pub security_answer: Option<String>,
}
