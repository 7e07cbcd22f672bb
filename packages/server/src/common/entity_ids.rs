//! Typed ID definitions for domain entities.

pub use super::id::Id;

/// Marker type for persisted research reports.
pub struct ResearchReport;

/// Typed ID for reports.
pub type ReportId = Id<ResearchReport>;
