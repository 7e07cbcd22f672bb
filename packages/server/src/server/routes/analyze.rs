//! Analysis endpoints: one for web URLs, one for PDF uploads.

use axum::{
    extract::{
        multipart::{Multipart, MultipartRejection},
        rejection::JsonRejection,
        Extension,
    },
    Json,
};
use extraction::{PdfMetadata, SourceInput, SourceType};
use serde::{Deserialize, Serialize};

use crate::common::{entity_ids::ReportId, write_session};
use crate::domains::insights::InsightSet;
use crate::domains::research::{analyze_source, AnalysisOutcome};
use crate::server::app::AppState;
use crate::server::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct AnalyzeUrlRequest {
    pub url: Option<String>,
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse<T> {
    pub success: bool,
    pub report_id: ReportId,
    pub session_id: String,
    pub data: T,
}

#[derive(Debug, Serialize)]
pub struct UrlAnalysis {
    pub url: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub source_type: SourceType,
    #[serde(flatten)]
    pub insights: InsightSet,
}

#[derive(Debug, Serialize)]
pub struct PdfAnalysis {
    pub filename: String,
    pub metadata: Option<PdfMetadata>,
    pub source_type: SourceType,
    #[serde(flatten)]
    pub insights: InsightSet,
}

/// POST /api/analyze-url
pub async fn analyze_url_handler(
    Extension(state): Extension<AppState>,
    payload: Result<Json<AnalyzeUrlRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse<UrlAnalysis>>, ApiError> {
    let Json(request) = payload?;
    let url = request
        .url
        .ok_or_else(|| ApiError::BadRequest("URL is required".into()))?;
    let session_id = write_session(request.session_id);

    let AnalysisOutcome {
        report,
        source,
        insights,
    } = analyze_source(&state.deps, &session_id, SourceInput::Url(url.clone())).await?;

    Ok(Json(AnalyzeResponse {
        success: true,
        report_id: report.id,
        session_id,
        data: UrlAnalysis {
            url,
            title: source.title,
            description: source.description,
            source_type: source.source_type,
            insights,
        },
    }))
}

/// POST /api/analyze-pdf (multipart: `file`, optional `session_id`)
pub async fn analyze_pdf_handler(
    Extension(state): Extension<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AnalyzeResponse<PdfAnalysis>>, ApiError> {
    let upload = read_upload(multipart?).await?;
    let (filename, bytes) = upload
        .file
        .ok_or_else(|| ApiError::BadRequest("No file provided".into()))?;
    let session_id = write_session(upload.session_id);

    let outcome =
        analyze_source(&state.deps, &session_id, SourceInput::pdf(filename.clone(), bytes)).await?;

    Ok(Json(AnalyzeResponse {
        success: true,
        report_id: outcome.report.id,
        session_id,
        data: PdfAnalysis {
            filename,
            metadata: outcome.source.pdf,
            source_type: outcome.source.source_type,
            insights: outcome.insights,
        },
    }))
}

#[derive(Default)]
struct Upload {
    file: Option<(String, Vec<u8>)>,
    session_id: Option<String>,
}

async fn read_upload(mut multipart: Multipart) -> Result<Upload, ApiError> {
    let mut upload = Upload::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await?;
                upload.file = Some((filename, bytes.to_vec()));
            }
            "session_id" => upload.session_id = Some(field.text().await?),
            _ => {}
        }
    }

    Ok(upload)
}
