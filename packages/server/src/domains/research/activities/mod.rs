pub mod analyze;

pub use analyze::{analyze_source, AnalysisOutcome, PipelineStage};
