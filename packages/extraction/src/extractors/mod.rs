//! Extractor implementations.
//!
//! - `UrlExtractor` - single-page HTTP fetch + HTML text extraction
//! - `PdfExtractor` - per-page PDF text + document metadata
//! - `SourceExtractor` - dispatches to the two above by input kind
//! - `MockExtractor` - for testing

mod mock;
mod pdf;
mod source;
mod url;

pub use self::url::{ParsedPage, UrlExtractor, FETCH_TIMEOUT, MAX_BODY_BYTES};
pub use mock::MockExtractor;
pub use pdf::PdfExtractor;
pub use source::SourceExtractor;

pub use crate::traits::extractor::{validate_input, Extractor};
