//! Routes each input to the extractor for its kind.

use async_trait::async_trait;

use super::{PdfExtractor, UrlExtractor};
use crate::error::ExtractResult;
use crate::traits::extractor::Extractor;
use crate::types::{ExtractedSource, SourceInput};

/// Production extractor: URLs go to [`UrlExtractor`], uploads to
/// [`PdfExtractor`].
#[derive(Clone)]
pub struct SourceExtractor {
    url: UrlExtractor,
    pdf: PdfExtractor,
}

impl SourceExtractor {
    pub fn new() -> ExtractResult<Self> {
        Ok(Self::from_parts(UrlExtractor::new()?, PdfExtractor::new()))
    }

    pub fn from_parts(url: UrlExtractor, pdf: PdfExtractor) -> Self {
        Self { url, pdf }
    }
}

#[async_trait]
impl Extractor for SourceExtractor {
    async fn extract(&self, input: &SourceInput) -> ExtractResult<ExtractedSource> {
        match input {
            SourceInput::Url(_) => self.url.extract(input).await,
            SourceInput::Pdf { .. } => self.pdf.extract(input).await,
        }
    }
}
