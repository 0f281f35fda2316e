//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests that do not meet
//! the requirement. Both re-fetch the user row, so a deactivation or role
//! change takes effect on the next request even though the JWT still
//! carries the old values.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use leadhub_core::error::CoreError;
use leadhub_core::roles::ROLE_SUPER_ADMIN;
use leadhub_db::repositories::{RoleRepo, UserRepo};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires an authenticated user whose account is still active.
///
/// Deactivated users can log in and out but are blocked here on every
/// normal route. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn active_only(RequireActive(user): RequireActive) -> AppResult<Json<()>> {
///     // user exists and is active here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireActive(pub AuthUser);

impl FromRequestParts<AppState> for RequireActive {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth = AuthUser::from_request_parts(parts, state).await?;

        let user = UserRepo::find_by_id(&state.pool, auth.user_id)
            .await?
            .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

        if !user.is_active {
            return Err(AppError::Core(CoreError::Forbidden(
                "Account is deactivated".into(),
            )));
        }

        Ok(RequireActive(auth))
    }
}

/// Requires an active user with the `superAdmin` role. Rejects with 403
/// Forbidden otherwise. The role comes from the fresh user row, not the
/// token claims.
///
/// ```ignore
/// async fn admin_only(RequireSuperAdmin(user): RequireSuperAdmin) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireSuperAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireSuperAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth = AuthUser::from_request_parts(parts, state).await?;

        let user = UserRepo::find_by_id(&state.pool, auth.user_id)
            .await?
            .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

        if !user.is_active {
            return Err(AppError::Core(CoreError::Forbidden(
                "Account is deactivated".into(),
            )));
        }

        let role = RoleRepo::resolve_name(&state.pool, user.role_id).await?;
        if role != ROLE_SUPER_ADMIN {
            return Err(AppError::Core(CoreError::Forbidden(
                "SuperAdmin role required".into(),
            )));
        }

        Ok(RequireSuperAdmin(AuthUser {
            user_id: auth.user_id,
            role,
        }))
    }
}
