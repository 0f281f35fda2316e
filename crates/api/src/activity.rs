//! Fire-and-forget recording of audit entries.
//!
//! Every successful create/update/delete of a Lead, Tag, User, or Comment
//! produces exactly one activity-log row. The write happens on a spawned
//! task after the primary mutation commits: the HTTP response does not wait
//! for it, and an insert failure is logged at WARN and never surfaced to
//! the caller.

use leadhub_core::activity::ActivityAction;
use leadhub_core::types::DbId;
use leadhub_db::models::activity::CreateActivityLog;
use leadhub_db::repositories::ActivityLogRepo;
use leadhub_db::DbPool;

/// Record one audit entry for the acting user.
pub fn record_activity(
    pool: &DbPool,
    actor_id: DbId,
    action: ActivityAction,
    lead_id: Option<DbId>,
    details: &str,
) {
    let pool = pool.clone();
    let input = CreateActivityLog {
        user_id: actor_id,
        action: action.as_str().to_string(),
        details: details.to_string(),
        lead_id,
    };

    tokio::spawn(async move {
        if let Err(error) = ActivityLogRepo::insert(&pool, &input).await {
            tracing::warn!(
                %error,
                user_id = input.user_id,
                action = %input.action,
                "Failed to record activity log"
            );
        }
    });
}
