//! In-memory storage implementation for testing and development.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::RwLock;

use crate::domains::reports::Report;
use crate::domains::usage::{Tier, UsageRecord};
use crate::kernel::{BaseReportStore, BaseUsageStore};

/// In-memory storage for usage records and reports.
///
/// Useful for testing and local development. Not suitable for production
/// as data is lost on restart.
pub struct MemoryStore {
    usage: RwLock<HashMap<String, UsageRecord>>,
    reports: RwLock<Vec<Report>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            usage: RwLock::new(HashMap::new()),
            reports: RwLock::new(Vec::new()),
        }
    }

    /// Put a session on a tier, creating its record if needed.
    pub fn set_tier(&self, session_id: &str, tier: Tier, now: DateTime<Utc>) {
        self.usage
            .write()
            .unwrap()
            .entry(session_id.to_string())
            .or_insert_with(|| UsageRecord::fresh(session_id, now))
            .tier = tier;
    }

    /// Overwrite a session's record.
    pub fn put_usage(&self, record: UsageRecord) {
        self.usage
            .write()
            .unwrap()
            .insert(record.session_id.clone(), record);
    }

    /// Stored record, without creating or resetting it.
    pub fn peek_usage(&self, session_id: &str) -> Option<UsageRecord> {
        self.usage.read().unwrap().get(session_id).cloned()
    }

    pub fn report_count(&self) -> usize {
        self.reports.read().unwrap().len()
    }
}

#[async_trait]
impl BaseUsageStore for MemoryStore {
    async fn get_or_create(&self, fresh: UsageRecord) -> Result<UsageRecord> {
        Ok(self
            .usage
            .write()
            .unwrap()
            .entry(fresh.session_id.clone())
            .or_insert(fresh)
            .clone())
    }

    async fn reset_if_expired(
        &self,
        session_id: &str,
        now: DateTime<Utc>,
        next_reset_at: DateTime<Utc>,
    ) -> Result<Option<UsageRecord>> {
        let mut usage = self.usage.write().unwrap();
        Ok(match usage.get_mut(session_id) {
            Some(record) if record.reset_at < now => {
                record.reports_generated = 0;
                record.reset_at = next_reset_at;
                Some(record.clone())
            }
            _ => None,
        })
    }

    async fn increment_below(
        &self,
        session_id: &str,
        limit: Option<u32>,
    ) -> Result<Option<UsageRecord>> {
        let mut usage = self.usage.write().unwrap();
        Ok(match usage.get_mut(session_id) {
            Some(record) if limit.map_or(true, |l| record.reports_generated < l) => {
                record.reports_generated += 1;
                Some(record.clone())
            }
            _ => None,
        })
    }
}

#[async_trait]
impl BaseReportStore for MemoryStore {
    async fn insert_report(&self, report: &Report) -> Result<()> {
        self.reports.write().unwrap().push(report.clone());
        Ok(())
    }

    async fn list_reports(&self, session_id: &str, limit: usize) -> Result<Vec<Report>> {
        let mut reports: Vec<Report> = self
            .reports
            .read()
            .unwrap()
            .iter()
            .filter(|r| r.session_id == session_id)
            .cloned()
            .collect();

        reports.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        reports.truncate(limit);
        Ok(reports)
    }
}
