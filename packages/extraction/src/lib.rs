//! Source extraction library
//!
//! Normalizes heterogeneous sources (web pages, PDF uploads) into one
//! canonical shape: bounded plain text, a source type, and optional
//! title/metadata.
//!
//! # Usage
//!
//! ```rust,ignore
//! use extraction::{Extractor, SourceExtractor, SourceInput};
//!
//! let extractor = SourceExtractor::new()?;
//! let input = SourceInput::Url("https://example.com".into());
//!
//! extractor.validate(&input)?;
//! let source = extractor.extract(&input).await?;
//! println!("{} chars from a {} source", source.char_count(), source.source_type);
//! ```
//!
//! # Modules
//!
//! - [`traits`] - The `Extractor` contract and shared input validation
//! - [`extractors`] - URL, PDF, dispatching and mock implementations
//! - [`types`] - Inputs, outputs and source classification
//! - [`text`] - Truncation and whitespace normalization
//! - [`error`] - Tagged extraction errors

pub mod error;
pub mod extractors;
pub mod text;
pub mod traits;
pub mod types;

pub use error::{ExtractError, ExtractErrorKind, ExtractResult};
pub use extractors::{
    MockExtractor, ParsedPage, PdfExtractor, SourceExtractor, UrlExtractor, FETCH_TIMEOUT,
    MAX_BODY_BYTES,
};
pub use text::{collapse_lines, truncate_chars};
pub use traits::extractor::{parse_web_url, validate_input, Extractor};
pub use types::{
    ExtractedSource, PdfMetadata, SourceInput, SourceType, MAX_EXTRACTED_CHARS,
};
