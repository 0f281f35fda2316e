//! Well-known role name constants.
//!
//! These must match the seed data in `20260301000001_create_roles_table.sql`.
//! Role names are client-facing and serialized verbatim, hence the camelCase.

pub const ROLE_SUPER_ADMIN: &str = "superAdmin";
pub const ROLE_SUB_ADMIN: &str = "subAdmin";
pub const ROLE_SUPPORT_AGENT: &str = "supportAgent";

/// Every role a user can be assigned.
pub const ALL_ROLES: &[&str] = &[ROLE_SUPER_ADMIN, ROLE_SUB_ADMIN, ROLE_SUPPORT_AGENT];

/// Check whether a role name is one of the seeded roles.
pub fn is_valid_role(role: &str) -> bool {
    ALL_ROLES.contains(&role)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_roles_are_valid() {
        assert!(is_valid_role(ROLE_SUPER_ADMIN));
        assert!(is_valid_role(ROLE_SUB_ADMIN));
        assert!(is_valid_role(ROLE_SUPPORT_AGENT));
    }

    #[test]
    fn unknown_and_differently_cased_roles_are_invalid() {
        assert!(!is_valid_role("superadmin"));
        assert!(!is_valid_role("admin"));
        assert!(!is_valid_role(""));
    }
}
