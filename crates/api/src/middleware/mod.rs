//! Authentication and authorization middleware extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from the session
//!   cookie or a JWT Bearer token.
//! - [`rbac::RequireActive`] -- Requires an authenticated, non-deactivated user.
//! - [`rbac::RequireSuperAdmin`] -- Requires the `superAdmin` role.

pub mod auth;
pub mod rbac;
