use axum::{
    extract::{rejection::QueryRejection, Extension, Query},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::read_session;
use crate::domains::usage::{get_usage, Tier, UsageRecord};
use crate::server::app::AppState;
use crate::server::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct UsageQuery {
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UsageSummary {
    pub reports_generated: u32,
    /// `None` (JSON null) for unbounded tiers
    pub limit: Option<u32>,
    pub tier: Tier,
    pub reset_date: DateTime<Utc>,
}

impl From<UsageRecord> for UsageSummary {
    fn from(record: UsageRecord) -> Self {
        Self {
            reports_generated: record.reports_generated,
            limit: record.limit(),
            tier: record.tier,
            reset_date: record.reset_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UsageResponse {
    pub success: bool,
    pub usage: UsageSummary,
}

/// GET /api/usage?session_id
///
/// Reading usage applies a due reset, same as spending quota does.
pub async fn usage_handler(
    Extension(state): Extension<AppState>,
    query: Result<Query<UsageQuery>, QueryRejection>,
) -> Result<Json<UsageResponse>, ApiError> {
    let Query(query) = query?;
    let session_id = read_session(query.session_id);

    let record = get_usage(state.deps.usage_store.as_ref(), &session_id).await?;

    Ok(Json(UsageResponse {
        success: true,
        usage: record.into(),
    }))
}
