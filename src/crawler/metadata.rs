//! Per-page title and description extraction
//!
//! # Extraction Rules
//!
//! | Field | Canonical source | Fallback | Last resort |
//! |-------|------------------|----------|-------------|
//! | Title | `<title>` text | `"H1: "` + first `<h1>` text | `"No Title Available"` |
//! | Description | `<meta name="description" content>` | `"Paragraph: "` + first `<p>` text | `"No Description Available"` |
//!
//! All values are trimmed. Only an absent element (or a `<meta>` without
//! `content`) counts as missing, along with the literal text `N/A`. An element
//! that is present but empty keeps its empty text.

use crate::crawler::fetcher::PageFetcher;
use scraper::{ElementRef, Html, Selector};
use serde::Serialize;
use url::Url;

/// Marker value that counts as missing metadata
const MISSING: &str = "N/A";

pub const NO_TITLE: &str = "No Title Available";
pub const NO_DESCRIPTION: &str = "No Description Available";
pub const H1_PREFIX: &str = "H1: ";
pub const PARAGRAPH_PREFIX: &str = "Paragraph: ";

/// One row of the page inventory
///
/// Field names double as the CSV header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageRecord {
    #[serde(rename = "URL")]
    url: String,
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Meta Description")]
    description: String,
}

impl PageRecord {
    pub fn new(
        url: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Fetches `url` and builds its record
///
/// Returns None when the fetch fails for any reason; the failure is logged
/// and goes no further.
pub async fn extract_metadata<F: PageFetcher>(fetcher: &F, url: &Url) -> Option<PageRecord> {
    match fetcher.fetch(url).await {
        Ok(page) => Some(summarize_page(url, &page.body)),
        Err(e) => {
            tracing::debug!("No record for {}: {}", url, e);
            None
        }
    }
}

/// Builds the record for already-fetched markup
pub fn summarize_page(url: &Url, markup: &str) -> PageRecord {
    let document = Html::parse_document(markup);

    let mut title = extract_title(&document);
    let mut description = extract_description(&document);

    if title.is_none() || description.is_none() {
        let heading = first_text(&document, "h1");
        let paragraph = first_text(&document, "p");

        if title.is_none() {
            title = Some(match heading {
                Some(text) => format!("{}{}", H1_PREFIX, text),
                None => NO_TITLE.to_string(),
            });
        }
        if description.is_none() {
            description = Some(match paragraph {
                Some(text) => format!("{}{}", PARAGRAPH_PREFIX, text),
                None => NO_DESCRIPTION.to_string(),
            });
        }
    }

    PageRecord::new(
        url.as_str(),
        title.unwrap_or_else(|| NO_TITLE.to_string()),
        description.unwrap_or_else(|| NO_DESCRIPTION.to_string()),
    )
}

fn extract_title(document: &Html) -> Option<String> {
    first_text(document, "title")
}

/// Reads the content of the first `<meta name="description">`
///
/// The name is matched case-insensitively.
fn extract_description(document: &Html) -> Option<String> {
    let selector = Selector::parse("meta[name]").ok()?;

    document
        .select(&selector)
        .find(|element| {
            element
                .value()
                .attr("name")
                .is_some_and(|name| name.trim().eq_ignore_ascii_case("description"))
        })
        .and_then(|element| element.value().attr("content"))
        .and_then(present)
}

fn first_text(document: &Html, tag: &str) -> Option<String> {
    let selector = Selector::parse(tag).ok()?;
    document.select(&selector).next().and_then(|e| text_of(&e))
}

fn text_of(element: &ElementRef<'_>) -> Option<String> {
    present(&element.text().collect::<String>())
}

fn present(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed == MISSING {
        None
    } else {
        Some(trimmed.to_string())
    }
}
