use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

pub const FREE_TIER_LIMIT: u32 = 5;
pub const PRO_TIER_LIMIT: u32 = 50;

/// Length of one quota window.
pub const RESET_WINDOW_DAYS: i64 = 30;

/// Plan a session is on. Assigned outside this service; only ever read here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    #[default]
    Free,
    Pro,
    Business,
}

impl Tier {
    /// Reports allowed per window. `None` is unbounded.
    pub fn limit(&self) -> Option<u32> {
        match self {
            Tier::Free => Some(FREE_TIER_LIMIT),
            Tier::Pro => Some(PRO_TIER_LIMIT),
            Tier::Business => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Free => "free",
            Tier::Pro => "pro",
            Tier::Business => "business",
        }
    }

    /// Read a stored tier. Anything unrecognised is billed as free.
    pub fn from_stored(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "pro" => Tier::Pro,
            "business" => Tier::Business,
            _ => Tier::Free,
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-session report counter for the current quota window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageRecord {
    pub session_id: String,
    pub reports_generated: u32,
    pub tier: Tier,
    pub reset_at: DateTime<Utc>,
}

impl UsageRecord {
    /// First record for a session: free tier, nothing used yet.
    pub fn fresh(session_id: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            session_id: session_id.into(),
            reports_generated: 0,
            tier: Tier::Free,
            reset_at: next_reset(now),
        }
    }

    pub fn limit(&self) -> Option<u32> {
        self.tier.limit()
    }

    /// The window has lapsed and the counter is due for a reset.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.reset_at
    }

    pub fn is_exhausted(&self) -> bool {
        self.limit()
            .is_some_and(|limit| self.reports_generated >= limit)
    }
}

/// End of a window that starts at `now`.
pub fn next_reset(now: DateTime<Utc>) -> DateTime<Utc> {
    now + Duration::days(RESET_WINDOW_DAYS)
}
