//! Analysis pipeline: validate, spend quota, extract, generate, persist.
//!
//! Any failing stage ends the run. Quota spent at `QuotaCheck` is not given
//! back when a later stage fails, and the report is written in one insert
//! at the very end, so an abandoned run never leaves a partial report.

use extraction::{ExtractError, ExtractedSource, SourceInput};
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::domains::insights::{generate_insights, InsightSet};
use crate::domains::reports::Report;
use crate::domains::research::error::PipelineError;
use crate::domains::usage::try_increment;
use crate::kernel::ServerDeps;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Validating,
    QuotaCheck,
    Extracting,
    Generating,
    Persisting,
    Done,
}

impl PipelineStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Validating => "validating",
            Self::QuotaCheck => "quota_check",
            Self::Extracting => "extracting",
            Self::Generating => "generating",
            Self::Persisting => "persisting",
            Self::Done => "done",
        }
    }
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything a caller needs to answer a successful analysis.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub report: Report,
    pub source: ExtractedSource,
    pub insights: InsightSet,
}

/// Run one source through the full pipeline for `session_id`.
pub async fn analyze_source(
    deps: &ServerDeps,
    session_id: &str,
    input: SourceInput,
) -> Result<AnalysisOutcome, PipelineError> {
    let start = Instant::now();
    let label = input.label().to_string();

    let result = run_stages(deps, session_id, &input).await;
    match &result {
        Ok(outcome) => info!(
            session_id,
            source = %label,
            report_id = %outcome.report.id,
            duration_ms = start.elapsed().as_millis() as u64,
            "analysis complete"
        ),
        Err(e) => warn!(
            session_id,
            source = %label,
            reason = e.reason(),
            error = %e,
            duration_ms = start.elapsed().as_millis() as u64,
            "analysis failed"
        ),
    }
    result
}

async fn run_stages(
    deps: &ServerDeps,
    session_id: &str,
    input: &SourceInput,
) -> Result<AnalysisOutcome, PipelineError> {
    enter(PipelineStage::Validating, session_id);
    deps.extractor.validate(input).map_err(|e| match e {
        ExtractError::InvalidInput(message) => PipelineError::InvalidInput(message),
        other => PipelineError::Extraction(other),
    })?;

    enter(PipelineStage::QuotaCheck, session_id);
    let allowed = try_increment(deps.usage_store.as_ref(), session_id)
        .await
        .map_err(PipelineError::Persistence)?;
    if !allowed {
        return Err(PipelineError::QuotaExceeded);
    }

    enter(PipelineStage::Extracting, session_id);
    let source = deps.extractor.extract(input).await?;
    debug!(
        session_id,
        source_type = %source.source_type,
        chars = source.char_count(),
        "source extracted"
    );

    enter(PipelineStage::Generating, session_id);
    let insights = generate_insights(deps.ai.as_ref(), &source.text, source.source_type).await?;

    enter(PipelineStage::Persisting, session_id);
    let report = Report::new(
        session_id,
        input.label(),
        source.source_type,
        &source.text,
        &insights,
    );
    deps.report_store
        .insert_report(&report)
        .await
        .map_err(PipelineError::Persistence)?;

    enter(PipelineStage::Done, session_id);
    Ok(AnalysisOutcome {
        report,
        source,
        insights,
    })
}

fn enter(stage: PipelineStage, session_id: &str) {
    debug!(session_id, stage = %stage, "pipeline stage");
}
