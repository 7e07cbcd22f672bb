// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Business logic (quota rules, prompts, report assembly) lives in domain
// functions that use these traits.
//
// Naming convention: Base* for trait names (e.g., BaseAI, BaseUsageStore)

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domains::reports::Report;
use crate::domains::usage::UsageRecord;

// =============================================================================
// AI Trait (Infrastructure - structured LLM completions)
// =============================================================================

#[async_trait]
pub trait BaseAI: Send + Sync {
    /// Generate structured output constrained by a JSON schema.
    /// Returns the raw JSON string; callers deserialize and validate.
    ///
    /// Failures from the completion client are passed through unchanged so
    /// callers can tell timeouts apart from other provider errors.
    async fn generate_structured(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        schema_name: &str,
        schema: serde_json::Value,
    ) -> Result<String>;
}

// =============================================================================
// Usage Store Trait (Infrastructure - per-session counters)
// =============================================================================

/// Storage for usage records.
///
/// Every method is a single atomic step; the ledger composes them.
#[async_trait]
pub trait BaseUsageStore: Send + Sync {
    /// Insert `fresh` unless a record for its session exists, then return
    /// the stored record.
    async fn get_or_create(&self, fresh: UsageRecord) -> Result<UsageRecord>;

    /// Zero the counter and move the window to `next_reset_at`, but only if
    /// the stored window ended before `now`. `None` when nothing changed.
    async fn reset_if_expired(
        &self,
        session_id: &str,
        now: DateTime<Utc>,
        next_reset_at: DateTime<Utc>,
    ) -> Result<Option<UsageRecord>>;

    /// Add one to the counter if it is below `limit` (`None` = unbounded).
    /// `None` when the limit was already reached.
    async fn increment_below(
        &self,
        session_id: &str,
        limit: Option<u32>,
    ) -> Result<Option<UsageRecord>>;
}

// =============================================================================
// Report Store Trait (Infrastructure - append-only report log)
// =============================================================================

#[async_trait]
pub trait BaseReportStore: Send + Sync {
    async fn insert_report(&self, report: &Report) -> Result<()>;

    /// Newest first, at most `limit`.
    async fn list_reports(&self, session_id: &str, limit: usize) -> Result<Vec<Report>>;
}
