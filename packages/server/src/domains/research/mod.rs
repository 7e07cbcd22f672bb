//! Research domain: turns a URL or PDF into a stored insight report.

pub mod activities;
pub mod error;

pub use activities::{analyze_source, AnalysisOutcome, PipelineStage};
pub use error::PipelineError;
