//! Server dependencies for domain activities (using traits for testability)
//!
//! This module provides the central dependency container used by the
//! research pipeline and HTTP handlers. All external services sit behind
//! trait abstractions so tests can swap in mocks.

use std::sync::Arc;

use extraction::Extractor;

use crate::kernel::{BaseAI, BaseReportStore, BaseUsageStore};

/// Server dependencies, built once at startup and shared read-only.
#[derive(Clone)]
pub struct ServerDeps {
    /// Structured completions (insights, email drafts)
    pub ai: Arc<dyn BaseAI>,
    /// URL and PDF extraction
    pub extractor: Arc<dyn Extractor>,
    pub usage_store: Arc<dyn BaseUsageStore>,
    pub report_store: Arc<dyn BaseReportStore>,
}

impl ServerDeps {
    pub fn new(
        ai: Arc<dyn BaseAI>,
        extractor: Arc<dyn Extractor>,
        usage_store: Arc<dyn BaseUsageStore>,
        report_store: Arc<dyn BaseReportStore>,
    ) -> Self {
        Self {
            ai,
            extractor,
            usage_store,
            report_store,
        }
    }
}
