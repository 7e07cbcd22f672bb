//! Mock extractor for testing.
//!
//! Applies the real input validation, then answers from canned sources or
//! canned failures keyed by URL / filename.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::error::{ExtractError, ExtractErrorKind, ExtractResult};
use crate::traits::extractor::{parse_web_url, validate_input, Extractor};
use crate::types::{ExtractedSource, PdfMetadata, SourceInput, SourceType};

/// Mock extractor for testing.
///
/// ```rust
/// use extraction::{ExtractedSource, MockExtractor, SourceType};
///
/// let mock = MockExtractor::new()
///     .with_source("https://acme.test", ExtractedSource::new("Acme builds rockets", SourceType::Website));
/// ```
#[derive(Default, Clone)]
pub struct MockExtractor {
    sources: Arc<RwLock<HashMap<String, ExtractedSource>>>,
    failures: Arc<RwLock<HashMap<String, ExtractErrorKind>>>,
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `source` when `label` (URL or filename) is extracted.
    pub fn with_source(self, label: impl Into<String>, source: ExtractedSource) -> Self {
        self.sources.write().unwrap().insert(label.into(), source);
        self
    }

    /// Fail with an error of `kind` when `label` is extracted.
    pub fn with_failure(self, label: impl Into<String>, kind: ExtractErrorKind) -> Self {
        self.failures.write().unwrap().insert(label.into(), kind);
        self
    }

    /// Labels passed to `extract`, in call order.
    pub fn extract_calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }

    fn canned_error(kind: ExtractErrorKind, label: &str) -> ExtractError {
        match kind {
            ExtractErrorKind::InvalidInput => ExtractError::invalid_input("Invalid URL format"),
            ExtractErrorKind::Timeout => ExtractError::Timeout { url: label.to_string() },
            ExtractErrorKind::FetchFailed => ExtractError::http_status(label, 503),
            ExtractErrorKind::ParseFailed => ExtractError::ParseFailed("mock parse failure".into()),
            ExtractErrorKind::Unknown => ExtractError::Unknown("mock failure".into()),
        }
    }

    fn default_source(input: &SourceInput) -> ExtractedSource {
        match input {
            SourceInput::Url(raw) => {
                let source_type = parse_web_url(raw)
                    .map(|u| SourceType::from_url(&u))
                    .unwrap_or(SourceType::Website);
                ExtractedSource::new(
                    "Mock Company\nWe help teams ship faster.\nCareers\nContact",
                    source_type,
                )
                .with_title("Mock Page")
                .with_description("Mock description")
            }
            SourceInput::Pdf { .. } => {
                ExtractedSource::new("--- Page 1 ---\nMock document body", SourceType::Pdf)
                    .with_pdf_metadata(PdfMetadata {
                        num_pages: 1,
                        title: Some("Mock Document".into()),
                        author: None,
                    })
            }
        }
    }
}

#[async_trait]
impl Extractor for MockExtractor {
    async fn extract(&self, input: &SourceInput) -> ExtractResult<ExtractedSource> {
        let label = input.label().to_string();
        self.calls.write().unwrap().push(label.clone());

        validate_input(input)?;

        if let Some(kind) = self.failures.read().unwrap().get(&label).copied() {
            return Err(Self::canned_error(kind, &label));
        }
        if let Some(source) = self.sources.read().unwrap().get(&label).cloned() {
            return Ok(source);
        }
        Ok(Self::default_source(input))
    }
}
