//! Usage ledger: lazy window resets and quota-bounded increments.
//!
//! The store does the racy parts. A reset only applies while the stored
//! window is still the lapsed one, and an increment only applies while the
//! counter is under the limit, so concurrent callers on one session can
//! never push it past the tier limit.

use anyhow::Result;
use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::domains::usage::models::{next_reset, UsageRecord};
use crate::kernel::BaseUsageStore;

/// Current usage for a session, creating or resetting the record as needed.
pub async fn get_usage(store: &dyn BaseUsageStore, session_id: &str) -> Result<UsageRecord> {
    get_usage_at(store, session_id, Utc::now()).await
}

/// Spend one report from the session's quota. `false` means the limit is
/// reached and nothing changed.
pub async fn try_increment(store: &dyn BaseUsageStore, session_id: &str) -> Result<bool> {
    try_increment_at(store, session_id, Utc::now()).await
}

pub async fn get_usage_at(
    store: &dyn BaseUsageStore,
    session_id: &str,
    now: DateTime<Utc>,
) -> Result<UsageRecord> {
    let record = store
        .get_or_create(UsageRecord::fresh(session_id, now))
        .await?;

    if !record.is_expired(now) {
        return Ok(record);
    }

    match store
        .reset_if_expired(session_id, now, next_reset(now))
        .await?
    {
        Some(reset) => {
            info!(session_id, reset_at = %reset.reset_at, "usage window reset");
            Ok(reset)
        }
        // Another caller reset it first; theirs is the record to report.
        None => {
            store
                .get_or_create(UsageRecord::fresh(session_id, now))
                .await
        }
    }
}

pub async fn try_increment_at(
    store: &dyn BaseUsageStore,
    session_id: &str,
    now: DateTime<Utc>,
) -> Result<bool> {
    let usage = get_usage_at(store, session_id, now).await?;
    if usage.is_exhausted() {
        debug!(
            session_id,
            used = usage.reports_generated,
            tier = %usage.tier,
            "quota exhausted"
        );
        return Ok(false);
    }

    let updated = store.increment_below(session_id, usage.limit()).await?;
    if let Some(record) = &updated {
        debug!(session_id, used = record.reports_generated, "quota spent");
    }
    Ok(updated.is_some())
}
