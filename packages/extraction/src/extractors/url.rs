//! Web page extractor: single bounded fetch, HTML to plain text.

use std::time::Duration;

use async_trait::async_trait;
use scraper::{Html, Selector};
use tracing::{debug, warn};
use url::Url;

use crate::error::{ExtractError, ExtractResult};
use crate::text::{collapse_lines, truncate_chars};
use crate::traits::extractor::{parse_web_url, Extractor};
use crate::types::{ExtractedSource, SourceInput, SourceType, MAX_EXTRACTED_CHARS};

/// Default fetch deadline.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// Most of a response body that is ever read. Pages are cut to
/// `MAX_EXTRACTED_CHARS` of text anyway, so the rest is never buffered.
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Elements whose text never reaches the output.
const STRIPPED_ELEMENTS: &[&str] = &["script", "style", "nav", "footer", "header", "noscript"];

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Fetches one page over HTTP and reduces it to visible text.
///
/// No JavaScript rendering and no link following.
#[derive(Clone)]
pub struct UrlExtractor {
    client: reqwest::Client,
    timeout: Duration,
    max_body_bytes: usize,
}

/// Parsed view of an HTML document.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedPage {
    pub title: Option<String>,
    pub description: Option<String>,
    pub text: String,
}

impl UrlExtractor {
    pub fn new() -> ExtractResult<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
            ),
        );
        headers.insert(
            reqwest::header::ACCEPT_LANGUAGE,
            reqwest::header::HeaderValue::from_static("en-US,en;q=0.5"),
        );

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(|e| ExtractError::Unknown(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            timeout: FETCH_TIMEOUT,
            max_body_bytes: MAX_BODY_BYTES,
        })
    }

    /// Override the fetch deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the response body ceiling.
    pub fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetch `url` and return at most `max_body_bytes` of its body.
    async fn fetch_html(&self, url: &Url) -> ExtractResult<String> {
        let mut response = self
            .client
            .get(url.clone())
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| fetch_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = %status, "fetch returned error status");
            return Err(ExtractError::http_status(url.as_str(), status.as_u16()));
        }

        let mut body: Vec<u8> = Vec::new();
        while let Some(chunk) = response.chunk().await.map_err(|e| fetch_error(url, e))? {
            let room = self.max_body_bytes - body.len();
            if chunk.len() > room {
                body.extend_from_slice(&chunk[..room]);
                debug!(url = %url, limit = self.max_body_bytes, "response body capped");
                break;
            }
            body.extend_from_slice(&chunk);
        }

        Ok(String::from_utf8_lossy(&body).into_owned())
    }

    /// Reduce an HTML document to title, meta description and visible text.
    pub fn parse_html(html: &str) -> ParsedPage {
        let document = Html::parse_document(html);

        ParsedPage {
            title: extract_title(&document),
            description: extract_meta_description(&document),
            text: visible_text(&document),
        }
    }
}

#[async_trait]
impl Extractor for UrlExtractor {
    async fn extract(&self, input: &SourceInput) -> ExtractResult<ExtractedSource> {
        let raw = match input {
            SourceInput::Url(raw) => raw,
            SourceInput::Pdf { .. } => {
                return Err(ExtractError::invalid_input("expected a URL, got a document"))
            }
        };
        let url = parse_web_url(raw)?;

        debug!(url = %url, "fetching page");
        let html = self.fetch_html(&url).await?;
        let page = Self::parse_html(&html);

        let text = truncate_chars(&page.text, MAX_EXTRACTED_CHARS).to_string();
        debug!(url = %url, chars = text.chars().count(), "page extracted");

        let title = page
            .title
            .unwrap_or_else(|| url.host_str().unwrap_or_default().to_string());
        let mut source = ExtractedSource::new(text, SourceType::from_url(&url)).with_title(title);
        if let Some(description) = page.description {
            source = source.with_description(description);
        }
        Ok(source)
    }
}

fn fetch_error(url: &Url, e: reqwest::Error) -> ExtractError {
    if e.is_timeout() {
        warn!(url = %url, "fetch timed out");
        ExtractError::Timeout {
            url: url.to_string(),
        }
    } else {
        warn!(url = %url, error = %e, "fetch failed");
        ExtractError::FetchFailed {
            url: url.to_string(),
            source: Box::new(e),
        }
    }
}

fn extract_title(document: &Html) -> Option<String> {
    let selector = Selector::parse("title").ok()?;
    document
        .select(&selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
}

fn extract_meta_description(document: &Html) -> Option<String> {
    let selector = Selector::parse(r#"meta[name="description"]"#).ok()?;
    document
        .select(&selector)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
}

/// Every text node outside the stripped elements, one per line.
fn visible_text(document: &Html) -> String {
    let mut chunks: Vec<&str> = Vec::new();

    for node in document.tree.root().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| STRIPPED_ELEMENTS.contains(&el.name()))
        });
        if !hidden {
            chunks.push(&**text);
        }
    }

    collapse_lines(&chunks.join("\n"))
}
