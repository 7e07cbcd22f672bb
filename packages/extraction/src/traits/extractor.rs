//! Extractor trait: one contract for every kind of source.
//!
//! ```rust,ignore
//! use extraction::{Extractor, SourceExtractor, SourceInput};
//!
//! let extractor = SourceExtractor::new()?;
//! extractor.validate(&input)?;              // no I/O
//! let source = extractor.extract(&input).await?;
//! ```

use async_trait::async_trait;

use crate::error::{ExtractError, ExtractResult};
use crate::types::{ExtractedSource, SourceInput};

/// Turns a [`SourceInput`] into an [`ExtractedSource`].
///
/// Implementations never let an untyped failure escape: every error is one
/// of the [`ExtractError`] variants.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Cheap input check that performs no I/O.
    ///
    /// Callers run this before committing any resources to the request.
    fn validate(&self, input: &SourceInput) -> ExtractResult<()> {
        validate_input(input)
    }

    /// Fetch or parse the source and return normalized text.
    async fn extract(&self, input: &SourceInput) -> ExtractResult<ExtractedSource>;
}

/// Input rules shared by every extractor.
///
/// - URLs must parse as absolute `http`/`https` URLs with a host.
/// - Uploads must carry a `.pdf` filename and a non-empty body.
pub fn validate_input(input: &SourceInput) -> ExtractResult<()> {
    match input {
        SourceInput::Url(raw) => parse_web_url(raw).map(|_| ()),
        SourceInput::Pdf { filename, bytes } => {
            if !filename.to_ascii_lowercase().ends_with(".pdf") {
                return Err(ExtractError::invalid_input("Only PDF files are supported"));
            }
            if bytes.is_empty() {
                return Err(ExtractError::invalid_input("Uploaded file is empty"));
            }
            Ok(())
        }
    }
}

/// Parse `raw` as an absolute web URL.
pub fn parse_web_url(raw: &str) -> ExtractResult<url::Url> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ExtractError::invalid_input("URL is required"));
    }

    let url = url::Url::parse(trimmed)
        .map_err(|_| ExtractError::invalid_input("Invalid URL format"))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ExtractError::invalid_input("Invalid URL format"));
    }
    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(ExtractError::invalid_input("Invalid URL format")),
    }
}
