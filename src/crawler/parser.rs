//! Link extraction from raw page markup
//!
//! Only `<a href>` targets are considered. Each target is resolved against
//! the page URL, fragment-stripped and kept only when it shares the page's
//! origin. The HTML parser recovers from malformed markup, so whatever links
//! survive parsing are returned and nothing here can fail.

use crate::url::{resolve_link, Origin};
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Extracts the set of same-origin links in `markup`
///
/// # Arguments
///
/// * `base_url` - The URL the markup was fetched from
/// * `markup` - The HTML content
///
/// # Example
///
/// ```
/// use site_ledger::crawler::extract_internal_links;
/// use url::Url;
///
/// let html = r#"<a href="/about#team">About</a><a href="https://other.com/">Other</a>"#;
/// let base = Url::parse("https://example.com/").unwrap();
/// let links = extract_internal_links(&base, html);
/// assert_eq!(links.len(), 1);
/// assert!(links.contains(&Url::parse("https://example.com/about").unwrap()));
/// ```
pub fn extract_internal_links(base_url: &Url, markup: &str) -> HashSet<Url> {
    let Some(origin) = Origin::of(base_url) else {
        return HashSet::new();
    };

    let document = Html::parse_document(markup);
    let mut links = HashSet::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            let Some(href) = element.value().attr("href") else {
                continue;
            };

            match resolve_link(base_url, href) {
                Some(url) if origin.contains(&url) => {
                    links.insert(url);
                }
                Some(url) => {
                    tracing::trace!("Dropping cross-origin link {}", url);
                }
                None => {}
            }
        }
    }

    links
}
