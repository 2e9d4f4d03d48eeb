use crate::{UrlError, UrlResult};
use url::Url;

/// Normalizes a URL string into Site-Ledger's canonical form
///
/// # Normalization Steps
///
/// 1. Parse the URL; reject if malformed or relative
/// 2. Accept only HTTP and HTTPS schemes
/// 3. Require a host
/// 4. Remove fragment (everything after #)
///
/// Parsing already lowercases the host, resolves dot segments and turns an
/// empty path into `/`, so normalizing twice yields the same URL.
///
/// # Examples
///
/// ```
/// use site_ledger::url::normalize_url;
///
/// let url = normalize_url("https://EXAMPLE.com/a/../page#top").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/page");
/// ```
pub fn normalize_url(url_str: &str) -> UrlResult<Url> {
    let url = Url::parse(url_str).map_err(|e| UrlError::Parse(e.to_string()))?;
    finish(url)
}

/// Resolves a link target against the page it was found on
///
/// Returns None when the target cannot be joined onto `base` or does not
/// resolve to an HTTP(S) URL with a host (`mailto:`, `javascript:`, `data:`
/// and friends all fall out here). The result has no fragment.
///
/// ```
/// use site_ledger::url::resolve_link;
/// use url::Url;
///
/// let base = Url::parse("https://example.com/docs/intro").unwrap();
/// let url = resolve_link(&base, "setup#install").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/docs/setup");
/// ```
pub fn resolve_link(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();
    let joined = base.join(href).ok()?;
    finish(joined).ok()
}

/// Validates the user-supplied seed URL
///
/// The seed must be a syntactically valid absolute URL with scheme and host;
/// this is the only input whose rejection fails a whole run.
pub fn parse_seed(input: &str) -> UrlResult<Url> {
    let input = input.trim();
    if input.is_empty() {
        return Err(UrlError::Empty);
    }
    normalize_url(input)
}

fn finish(mut url: Url) -> UrlResult<Url> {
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => {}
        _ => return Err(UrlError::MissingHost),
    }

    url.set_fragment(None);
    Ok(url)
}
