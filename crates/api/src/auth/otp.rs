//! In-memory pending-registration store for the OTP signup flow.
//!
//! Each entry stages a not-yet-persisted user keyed by email, together with a
//! 6-digit one-time code and an absolute expiry. The store is process-local:
//! a restart discards all in-flight registrations, which is the documented
//! trade-off of the default backend. Expired entries are purged lazily when
//! the email they belong to is touched again.

use std::collections::HashMap;

use chrono::{Duration, Utc};
use leadhub_core::types::Timestamp;
use rand::Rng;
use tokio::sync::Mutex;

/// How long a staged registration stays verifiable.
const OTP_TTL_MINS: i64 = 10;

/// A staged registration awaiting OTP verification.
#[derive(Debug, Clone)]
pub struct PendingRegistration {
    pub name: String,
    pub password_hash: String,
    pub security_answer: String,
    pub otp: String,
    pub expires_at: Timestamp,
}

/// Why a verification attempt failed.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum VerifyError {
    /// No staged registration exists for the email.
    #[error("No registration found for this email")]
    NoRegistration,

    /// The code does not match or the entry has expired.
    #[error("Invalid or expired OTP")]
    InvalidOrExpired,
}

/// Expiring map of staged registrations, keyed by email.
///
/// All operations take the inner lock, so the check-then-insert in
/// [`stage`](Self::stage) is atomic: two concurrent registrations for the
/// same email cannot both stage an entry.
#[derive(Default)]
pub struct PendingRegistrations {
    entries: Mutex<HashMap<String, PendingRegistration>>,
}

impl PendingRegistrations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a registration and return the generated OTP, or `None` when an
    /// unexpired entry already exists for the email. An expired leftover is
    /// replaced as if it were absent.
    pub async fn stage(
        &self,
        email: &str,
        name: String,
        password_hash: String,
        security_answer: String,
    ) -> Option<String> {
        self.stage_with_ttl(
            email,
            name,
            password_hash,
            security_answer,
            Duration::minutes(OTP_TTL_MINS),
        )
        .await
    }

    async fn stage_with_ttl(
        &self,
        email: &str,
        name: String,
        password_hash: String,
        security_answer: String,
        ttl: Duration,
    ) -> Option<String> {
        let mut entries = self.entries.lock().await;

        if let Some(existing) = entries.get(email) {
            if existing.expires_at > Utc::now() {
                return None;
            }
            entries.remove(email);
        }

        let otp = generate_otp();
        entries.insert(
            email.to_string(),
            PendingRegistration {
                name,
                password_hash,
                security_answer,
                otp: otp.clone(),
                expires_at: Utc::now() + ttl,
            },
        );
        Some(otp)
    }

    /// Look up the code currently staged for an email without consuming it.
    ///
    /// The OTP never appears in an HTTP response, so flows without a mailbox
    /// (integration tests, local runs without SMTP) read it from here.
    pub async fn staged_otp(&self, email: &str) -> Option<String> {
        let entries = self.entries.lock().await;
        entries.get(email).map(|entry| entry.otp.clone())
    }

    /// Verify a code, consuming the entry on success.
    ///
    /// A mismatched code leaves the entry in place so the registrant can
    /// retry; an expired entry is purged and counted as invalid for this
    /// attempt. Success removes the entry permanently, so a second attempt
    /// with the same code fails with [`VerifyError::NoRegistration`].
    pub async fn take_verified(
        &self,
        email: &str,
        otp: &str,
    ) -> Result<PendingRegistration, VerifyError> {
        let mut entries = self.entries.lock().await;

        let entry = entries.get(email).ok_or(VerifyError::NoRegistration)?;

        if entry.expires_at <= Utc::now() {
            entries.remove(email);
            return Err(VerifyError::InvalidOrExpired);
        }
        if entry.otp != otp {
            return Err(VerifyError::InvalidOrExpired);
        }

        // Single use: the entry is gone after a successful verification.
        entries.remove(email).ok_or(VerifyError::NoRegistration)
    }
}

/// Generate a random 6-digit one-time code.
fn generate_otp() -> String {
    rand::rng().random_range(100_000..=999_999).to_string()
}
