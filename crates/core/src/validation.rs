//! Payload validation rules.
//!
//! Request DTOs in the API layer derive `validator::Validate` and point their
//! pattern/enum checks at the statics and functions here, so the rules stay in
//! one place and serve both the HTTP layer and CLI tooling. Rule failures are
//! flattened into [`FieldViolation`]s for the error response body.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use validator::ValidationError;

use crate::activity::ActivityAction;
use crate::lead::{LeadSource, LeadStatus};
use crate::roles;

/// Person/tag names: letters and spaces only.
pub static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z\s]+$").expect("valid regex"));

/// Phone numbers: exactly 10 digits.
pub static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("valid regex"));

/// Minimum length for person/tag names.
pub const MIN_NAME_LEN: u64 = 3;

/// Minimum length for passwords.
pub const MIN_PASSWORD_LEN: u64 = 6;

/// A single field-level rule violation, as serialized in 400 responses.
#[derive(Debug, Clone, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub rule_type: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
}

/// Flatten `validator` errors into one violation per failed rule.
///
/// Only flat field errors are expected; the request DTOs here do not nest.
pub fn collect_violations(errors: &validator::ValidationErrors) -> Vec<FieldViolation> {
    let mut violations: Vec<FieldViolation> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| FieldViolation {
                field: field.to_string(),
                rule_type: err.code.to_string(),
                message: err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{field} is invalid")),
                value: err.params.get("value").cloned(),
            })
        })
        .collect();

    // HashMap iteration order is arbitrary; keep the body deterministic.
    violations.sort_by(|a, b| a.field.cmp(&b.field).then(a.rule_type.cmp(&b.rule_type)));
    violations
}

// ---------------------------------------------------------------------------
// Custom rule functions (for `#[validate(custom(function = ...))]`)
// ---------------------------------------------------------------------------

pub fn validate_lead_source(source: &str) -> Result<(), ValidationError> {
    if LeadSource::parse(source).is_some() {
        Ok(())
    } else {
        Err(ValidationError::new("lead_source")
            .with_message("Source must be one of [website, referral, socialMedia]".into()))
    }
}

pub fn validate_lead_status(status: &str) -> Result<(), ValidationError> {
    if LeadStatus::parse(status).is_some() {
        Ok(())
    } else {
        Err(ValidationError::new("lead_status")
            .with_message("Status must be one of [New, Contacted, Qualified, Lost, Won]".into()))
    }
}

pub fn validate_role(role: &str) -> Result<(), ValidationError> {
    if roles::is_valid_role(role) {
        Ok(())
    } else {
        Err(ValidationError::new("role")
            .with_message("Role must be one of [superAdmin, subAdmin, supportAgent]".into()))
    }
}

pub fn validate_activity_action(action: &str) -> Result<(), ValidationError> {
    if ActivityAction::parse(action).is_some() {
        Ok(())
    } else {
        Err(ValidationError::new("activity_action")
            .with_message("Action must be one of [created, updated, deleted]".into()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
