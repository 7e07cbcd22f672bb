//! PDF extractor: per-page text plus document metadata.
//!
//! Parsing is CPU-bound, so it runs on tokio's blocking pool.

use async_trait::async_trait;
use lopdf::{Document, Object};
use tracing::debug;

use crate::error::{ExtractError, ExtractResult};
use crate::text::truncate_chars;
use crate::traits::extractor::{validate_input, Extractor};
use crate::types::{ExtractedSource, PdfMetadata, SourceInput, SourceType, MAX_EXTRACTED_CHARS};

#[derive(Debug, Clone, Default)]
pub struct PdfExtractor;

impl PdfExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Parse a PDF held in memory.
    ///
    /// Pages with no extractable text are skipped; the remaining pages are
    /// each prefixed with a `--- Page N ---` marker and separated by a blank
    /// line.
    pub fn parse(bytes: &[u8]) -> ExtractResult<ExtractedSource> {
        let document =
            Document::load_mem(bytes).map_err(|e| ExtractError::ParseFailed(e.to_string()))?;

        let pages = document.get_pages();
        let mut sections = Vec::with_capacity(pages.len());
        for &number in pages.keys() {
            match document.extract_text(&[number]) {
                Ok(text) if !text.trim().is_empty() => {
                    sections.push(format!("--- Page {} ---\n{}", number, text.trim()));
                }
                Ok(_) => {}
                Err(e) => debug!(page = number, error = %e, "no text on page"),
            }
        }

        let full_text = sections.join("\n\n");
        let metadata = PdfMetadata {
            num_pages: pages.len(),
            title: info_string(&document, b"Title"),
            author: info_string(&document, b"Author"),
        };

        let mut source = ExtractedSource::new(
            truncate_chars(&full_text, MAX_EXTRACTED_CHARS),
            SourceType::Pdf,
        );
        if let Some(title) = &metadata.title {
            source = source.with_title(title.clone());
        }
        Ok(source.with_pdf_metadata(metadata))
    }
}

#[async_trait]
impl Extractor for PdfExtractor {
    async fn extract(&self, input: &SourceInput) -> ExtractResult<ExtractedSource> {
        validate_input(input)?;
        let bytes = match input {
            SourceInput::Pdf { bytes, .. } => bytes.clone(),
            SourceInput::Url(_) => {
                return Err(ExtractError::invalid_input("expected a document, got a URL"))
            }
        };

        let source = tokio::task::spawn_blocking(move || Self::parse(&bytes))
            .await
            .map_err(|e| ExtractError::Unknown(format!("PDF worker failed: {}", e)))??;

        debug!(
            pages = source.pdf.as_ref().map(|m| m.num_pages).unwrap_or_default(),
            chars = source.char_count(),
            "document extracted"
        );
        Ok(source)
    }
}

/// Read a string entry from the trailer's Info dictionary.
fn info_string(document: &Document, key: &[u8]) -> Option<String> {
    let info = resolve(document, document.trailer.get(b"Info").ok()?)?;
    let dict = info.as_dict().ok()?;
    let value = resolve(document, dict.get(key).ok()?)?;

    match value {
        Object::String(bytes, _) => {
            let decoded = decode_pdf_string(bytes);
            let trimmed = decoded.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        _ => None,
    }
}

fn resolve<'a>(document: &'a Document, object: &'a Object) -> Option<&'a Object> {
    match object {
        Object::Reference(id) => document.get_object(*id).ok(),
        other => Some(other),
    }
}

/// Text strings are UTF-16BE with a BOM, or PDFDocEncoding (close to Latin-1).
fn decode_pdf_string(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(&[0xFE_u8, 0xFF]) {
        let units: Vec<u16> = rest
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16_lossy(&units)
    } else {
        bytes.iter().map(|&b| b as char).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExtractErrorKind;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Stream};

    /// Build a small PDF with one line of text per page.
    fn build_pdf(pages: &[&str], title: Option<&str>, author: Option<&str>) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids: Vec<Object> = Vec::new();
        for line in pages {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 24.into()]),
                    Operation::new("Td", vec![72.into(), 700.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*line)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id =
                doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut info = lopdf::Dictionary::new();
        if let Some(title) = title {
            info.set("Title", Object::string_literal(title));
        }
        if let Some(author) = author {
            info.set("Author", Object::string_literal(author));
        }
        let info_id = doc.add_object(info);
        doc.trailer.set("Info", info_id);

        let mut buf = Vec::new();
        doc.save_to(&mut buf).unwrap();
        buf
    }

    #[test]
    fn test_parse_marks_each_page() {
        let bytes = build_pdf(&["Quarterly plan", "Hiring goals"], None, None);
        let source = PdfExtractor::parse(&bytes).unwrap();

        assert_eq!(source.source_type, SourceType::Pdf);
        assert!(source.text.starts_with("--- Page 1 ---\n"));
        assert!(source.text.contains("Quarterly plan"));
        assert!(source.text.contains("\n\n--- Page 2 ---\n"));
        assert!(source.text.contains("Hiring goals"));
        assert_eq!(source.pdf.as_ref().unwrap().num_pages, 2);
    }

    #[test]
    fn test_parse_reads_info_metadata() {
        let bytes = build_pdf(&["Body"], Some("Q3 Plan"), Some("Dana Ortiz"));
        let source = PdfExtractor::parse(&bytes).unwrap();
        let metadata = source.pdf.unwrap();

        assert_eq!(metadata.title.as_deref(), Some("Q3 Plan"));
        assert_eq!(metadata.author.as_deref(), Some("Dana Ortiz"));
        assert_eq!(source.title.as_deref(), Some("Q3 Plan"));
    }

    #[test]
    fn test_missing_metadata_is_none() {
        let bytes = build_pdf(&["Body"], None, None);
        let metadata = PdfExtractor::parse(&bytes).unwrap().pdf.unwrap();
        assert_eq!(metadata.title, None);
        assert_eq!(metadata.author, None);
    }

    #[test]
    fn test_garbage_is_parse_failure() {
        let err = PdfExtractor::parse(b"definitely not a pdf").unwrap_err();
        assert_eq!(err.kind(), ExtractErrorKind::ParseFailed);
    }

    #[test]
    fn test_decode_utf16_title() {
        let bytes = [0xFE, 0xFF, 0x00, 0x48, 0x00, 0xE9];
        assert_eq!(decode_pdf_string(&bytes), "Hé");
        assert_eq!(decode_pdf_string(b"Plain"), "Plain");
    }

    #[tokio::test]
    async fn test_extract_runs_validation_first() {
        let extractor = PdfExtractor::new();
        let err = extractor
            .extract(&SourceInput::pdf("notes.txt", b"hello".to_vec()))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ExtractErrorKind::InvalidInput);

        let err = extractor
            .extract(&SourceInput::pdf("broken.pdf", b"hello".to_vec()))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ExtractErrorKind::ParseFailed);
    }

    #[tokio::test]
    async fn test_extract_truncates_long_documents() {
        let line = "x".repeat(90);
        let pages: Vec<&str> = std::iter::repeat(line.as_str()).take(300).collect();
        let bytes = build_pdf(&pages, None, None);

        let source = PdfExtractor::new()
            .extract(&SourceInput::pdf("long.pdf", bytes))
            .await
            .unwrap();
        assert_eq!(source.char_count(), MAX_EXTRACTED_CHARS);
    }
}
