//! PostgreSQL storage implementation.
//!
//! Quota changes are single conditional `UPDATE ... RETURNING` statements,
//! so row-level locking keeps concurrent increments on one session within
//! the limit without an explicit transaction.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use extraction::SourceType;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::FromRow;
use tracing::info;

use crate::common::ReportId;
use crate::domains::reports::Report;
use crate::domains::usage::{Tier, UsageRecord};
use crate::kernel::{BaseReportStore, BaseUsageStore};

const USAGE_COLUMNS: &str = "session_id, reports_generated, tier, reset_at";

/// PostgreSQL-backed usage and report store.
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Connect to `database_url` and bring the schema up to date.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await
            .context("Failed to connect to database")?;

        let store = Self::from_pool(pool);
        store.migrate().await?;
        Ok(store)
    }

    /// Wrap an existing pool. Does not run migrations.
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn migrate(&self) -> Result<()> {
        info!("Running database migrations...");
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run migrations")?;
        info!("Migrations complete");
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Put a session on a tier. Tiers are assigned outside this service;
    /// this exists for operators and tests.
    pub async fn set_tier(&self, session_id: &str, tier: Tier, now: DateTime<Utc>) -> Result<()> {
        let fresh = UsageRecord::fresh(session_id, now);
        sqlx::query(
            r#"
            INSERT INTO usage_records (session_id, reports_generated, tier, reset_at)
            VALUES ($1, 0, $2, $3)
            ON CONFLICT (session_id) DO UPDATE SET tier = EXCLUDED.tier, updated_at = now()
            "#,
        )
        .bind(session_id)
        .bind(tier.as_str())
        .bind(fresh.reset_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

// =============================================================================
// Rows
// =============================================================================

#[derive(Debug, FromRow)]
struct UsageRow {
    session_id: String,
    reports_generated: i32,
    tier: String,
    reset_at: DateTime<Utc>,
}

impl TryFrom<UsageRow> for UsageRecord {
    type Error = anyhow::Error;

    fn try_from(row: UsageRow) -> Result<Self> {
        Ok(Self {
            reports_generated: u32::try_from(row.reports_generated)
                .context("negative reports_generated")?,
            tier: Tier::from_stored(&row.tier),
            session_id: row.session_id,
            reset_at: row.reset_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct ReportRow {
    id: ReportId,
    source_url: String,
    source_type: String,
    source_content: String,
    conversation_starters: Vec<String>,
    pain_points: Vec<String>,
    market_gaps: Vec<String>,
    session_id: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<ReportRow> for Report {
    type Error = anyhow::Error;

    fn try_from(row: ReportRow) -> Result<Self> {
        Ok(Self {
            id: row.id,
            source_url: row.source_url,
            source_type: row
                .source_type
                .parse::<SourceType>()
                .map_err(anyhow::Error::msg)?,
            source_content: row.source_content,
            conversation_starters: row.conversation_starters,
            pain_points: row.pain_points,
            market_gaps: row.market_gaps,
            session_id: row.session_id,
            created_at: row.created_at,
        })
    }
}

// =============================================================================
// Usage
// =============================================================================

#[async_trait]
impl BaseUsageStore for PostgresStore {
    async fn get_or_create(&self, fresh: UsageRecord) -> Result<UsageRecord> {
        sqlx::query(
            r#"
            INSERT INTO usage_records (session_id, reports_generated, tier, reset_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (session_id) DO NOTHING
            "#,
        )
        .bind(&fresh.session_id)
        .bind(fresh.reports_generated as i32)
        .bind(fresh.tier.as_str())
        .bind(fresh.reset_at)
        .execute(&self.pool)
        .await
        .context("Failed to create usage record")?;

        sqlx::query_as::<_, UsageRow>(&format!(
            "SELECT {} FROM usage_records WHERE session_id = $1",
            USAGE_COLUMNS
        ))
        .bind(&fresh.session_id)
        .fetch_one(&self.pool)
        .await
        .context("Failed to load usage record")?
        .try_into()
    }

    async fn reset_if_expired(
        &self,
        session_id: &str,
        now: DateTime<Utc>,
        next_reset_at: DateTime<Utc>,
    ) -> Result<Option<UsageRecord>> {
        sqlx::query_as::<_, UsageRow>(&format!(
            r#"
            UPDATE usage_records
            SET reports_generated = 0, reset_at = $3, updated_at = now()
            WHERE session_id = $1 AND reset_at < $2
            RETURNING {}
            "#,
            USAGE_COLUMNS
        ))
        .bind(session_id)
        .bind(now)
        .bind(next_reset_at)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to reset usage record")?
        .map(UsageRecord::try_from)
        .transpose()
    }

    async fn increment_below(
        &self,
        session_id: &str,
        limit: Option<u32>,
    ) -> Result<Option<UsageRecord>> {
        sqlx::query_as::<_, UsageRow>(&format!(
            r#"
            UPDATE usage_records
            SET reports_generated = reports_generated + 1, updated_at = now()
            WHERE session_id = $1 AND ($2::BIGINT IS NULL OR reports_generated < $2)
            RETURNING {}
            "#,
            USAGE_COLUMNS
        ))
        .bind(session_id)
        .bind(limit.map(i64::from))
        .fetch_optional(&self.pool)
        .await
        .context("Failed to increment usage")?
        .map(UsageRecord::try_from)
        .transpose()
    }
}

// =============================================================================
// Reports
// =============================================================================

#[async_trait]
impl BaseReportStore for PostgresStore {
    async fn insert_report(&self, report: &Report) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO reports (
                id, source_url, source_type, source_content,
                conversation_starters, pain_points, market_gaps,
                session_id, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(report.id)
        .bind(&report.source_url)
        .bind(report.source_type.as_str())
        .bind(&report.source_content)
        .bind(report.conversation_starters.clone())
        .bind(report.pain_points.clone())
        .bind(report.market_gaps.clone())
        .bind(&report.session_id)
        .bind(report.created_at)
        .execute(&self.pool)
        .await
        .context("Failed to insert report")?;
        Ok(())
    }

    async fn list_reports(&self, session_id: &str, limit: usize) -> Result<Vec<Report>> {
        sqlx::query_as::<_, ReportRow>(
            r#"
            SELECT id, source_url, source_type, source_content,
                   conversation_starters, pain_points, market_gaps,
                   session_id, created_at
            FROM reports
            WHERE session_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(session_id)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list reports")?
        .into_iter()
        .map(Report::try_from)
        .collect()
    }
}
