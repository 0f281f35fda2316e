//! Shared response types for API handlers.
//!
//! Most endpoints return endpoint-specific bodies (`{message, lead}` and the
//! like), defined beside their handlers. The one shape shared across every
//! resource is the bare confirmation message used by deletes, logout, and
//! the OTP staging step.

use serde::Serialize;

/// Body for endpoints that return only a confirmation message.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
