use extraction::{ExtractError, ExtractErrorKind};
use thiserror::Error;

use crate::domains::insights::GenerationError;

/// Why an analysis run stopped before producing a report.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Rejected before any quota was spent.
    #[error("{0}")]
    InvalidInput(String),

    #[error("Usage limit reached. Please upgrade your plan.")]
    QuotaExceeded,

    #[error(transparent)]
    Extraction(#[from] ExtractError),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    /// Usage or report storage failed.
    #[error("storage failure: {0:#}")]
    Persistence(anyhow::Error),
}

impl PipelineError {
    /// Stable machine-readable code for callers.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::QuotaExceeded => "quota_exceeded",
            Self::Extraction(e) => match e.kind() {
                ExtractErrorKind::InvalidInput => "invalid_input",
                ExtractErrorKind::ParseFailed => "parse_failed",
                ExtractErrorKind::FetchFailed => "fetch_failed",
                ExtractErrorKind::Timeout => "timeout",
                ExtractErrorKind::Unknown => "extraction_failed",
            },
            Self::Generation(_) => "generation_failed",
            Self::Persistence(_) => "persistence_failed",
        }
    }

    pub fn upgrade_required(&self) -> bool {
        matches!(self, Self::QuotaExceeded)
    }
}
