use std::sync::Arc;

use crate::auth::otp::PendingRegistrations;
use crate::config::ServerConfig;
use crate::mailer::Mailer;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: leadhub_db::DbPool,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// Staged OTP registrations awaiting verification (process-local).
    pub pending_registrations: Arc<PendingRegistrations>,
    /// OTP mailer; `None` when SMTP is not configured.
    pub mailer: Arc<Option<Mailer>>,
}
