//! Canonical input and output types shared by all extractors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

/// Maximum characters of text an extractor hands downstream.
pub const MAX_EXTRACTED_CHARS: usize = 20_000;

/// Where extracted content came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Website,
    Linkedin,
    Twitter,
    Github,
    Pdf,
}

impl SourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::Website => "website",
            SourceType::Linkedin => "linkedin",
            SourceType::Twitter => "twitter",
            SourceType::Github => "github",
            SourceType::Pdf => "pdf",
        }
    }

    /// Classify a web URL by its host.
    ///
    /// A host matches a known network when it is that domain or a subdomain
    /// of it, so `www.linkedin.com` is LinkedIn but `netflix.com` is not X.
    /// A fully-qualified host (`github.com.`) matches like its bare form.
    pub fn from_url(url: &Url) -> Self {
        let host = url
            .host_str()
            .unwrap_or("")
            .trim_end_matches('.')
            .to_ascii_lowercase();
        let on = |domain: &str| host == domain || host.ends_with(&format!(".{}", domain));

        if on("linkedin.com") {
            SourceType::Linkedin
        } else if on("twitter.com") || on("x.com") {
            SourceType::Twitter
        } else if on("github.com") {
            SourceType::Github
        } else {
            SourceType::Website
        }
    }
}

impl std::fmt::Display for SourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SourceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "website" => Ok(SourceType::Website),
            "linkedin" => Ok(SourceType::Linkedin),
            "twitter" => Ok(SourceType::Twitter),
            "github" => Ok(SourceType::Github),
            "pdf" => Ok(SourceType::Pdf),
            other => Err(format!("Invalid source type: {}", other)),
        }
    }
}

/// Something a caller asked us to extract.
#[derive(Debug, Clone)]
pub enum SourceInput {
    /// Absolute http(s) URL to fetch
    Url(String),
    /// Uploaded document
    Pdf { filename: String, bytes: Vec<u8> },
}

impl SourceInput {
    pub fn pdf(filename: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        SourceInput::Pdf {
            filename: filename.into(),
            bytes: bytes.into(),
        }
    }

    /// URL or filename, as recorded on reports.
    pub fn label(&self) -> &str {
        match self {
            SourceInput::Url(url) => url,
            SourceInput::Pdf { filename, .. } => filename,
        }
    }
}

/// Document-level PDF metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PdfMetadata {
    pub num_pages: usize,
    pub title: Option<String>,
    pub author: Option<String>,
}

/// Normalized extractor output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedSource {
    /// Plain text, at most [`MAX_EXTRACTED_CHARS`] characters
    pub text: String,

    pub source_type: SourceType,

    /// Page title (URL) or document title (PDF)
    pub title: Option<String>,

    /// Meta description (URL only)
    pub description: Option<String>,

    /// Present for PDF sources
    pub pdf: Option<PdfMetadata>,

    pub extracted_at: DateTime<Utc>,
}

impl ExtractedSource {
    pub fn new(text: impl Into<String>, source_type: SourceType) -> Self {
        Self {
            text: text.into(),
            source_type,
            title: None,
            description: None,
            pdf: None,
            extracted_at: Utc::now(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_pdf_metadata(mut self, metadata: PdfMetadata) -> Self {
        self.pdf = Some(metadata);
        self
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}
