use axum::{
    extract::{rejection::QueryRejection, Extension, Query},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::common::read_session;
use crate::domains::reports::{clamp_limit, Report};
use crate::server::app::AppState;
use crate::server::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct ListReportsQuery {
    pub session_id: Option<String>,
    /// Kept as text: anything that is not an integer means the default.
    pub limit: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ListReportsResponse {
    pub success: bool,
    pub reports: Vec<Report>,
}

/// GET /api/reports?session_id&limit, newest first.
pub async fn list_reports_handler(
    Extension(state): Extension<AppState>,
    query: Result<Query<ListReportsQuery>, QueryRejection>,
) -> Result<Json<ListReportsResponse>, ApiError> {
    let Query(query) = query?;
    let session_id = read_session(query.session_id);
    let limit = clamp_limit(query.limit.and_then(|l| l.trim().parse().ok()));

    let reports = state
        .deps
        .report_store
        .list_reports(&session_id, limit)
        .await?;
    debug!(session_id, limit, count = reports.len(), "listed reports");

    Ok(Json(ListReportsResponse {
        success: true,
        reports,
    }))
}
