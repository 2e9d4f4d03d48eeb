//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the HTTP client from configuration
//! - GET requests with a bounded timeout
//! - Error classification into [`FetchError`] kinds
//!
//! The crawler and the metadata extractor only see the [`PageFetcher`]
//! trait, so tests can swap the network out.

use crate::config::{CrawlerConfig, UserAgentConfig};
use crate::state::PageState;
use reqwest::Client;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// A successfully fetched page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// The URL that was requested
    pub url: Url,
    /// Final URL after redirects
    pub final_url: Url,
    /// HTTP status code
    pub status_code: u16,
    /// Content-Type header value, if any
    pub content_type: Option<String>,
    /// Page body content
    pub body: String,
}

/// Why a fetch produced no page
///
/// Every kind is absorbed by the caller; the distinction only feeds logs
/// and statistics.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("HTTP {0}")]
    Status(u16),

    #[error("failed to read body: {0}")]
    Body(String),

    #[error("request failed: {0}")]
    Other(String),
}

impl FetchError {
    /// Maps the error to the terminal page state recorded for the URL
    pub fn page_state(&self) -> PageState {
        match self {
            Self::Timeout | Self::Connect(_) => PageState::Unreachable,
            Self::Status(404) | Self::Status(410) => PageState::DeadLink,
            Self::Status(429) => PageState::RateLimited,
            Self::Status(_) | Self::Body(_) | Self::Other(_) => PageState::Failed,
        }
    }

    fn from_reqwest(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else if error.is_connect() {
            Self::Connect(error.to_string())
        } else if error.is_body() || error.is_decode() {
            Self::Body(error.to_string())
        } else {
            Self::Other(error.to_string())
        }
    }
}

/// A page-fetch capability: GET a URL, yield its body or a failure kind
pub trait PageFetcher: Send + Sync {
    fn fetch(&self, url: &Url) -> impl Future<Output = Result<FetchedPage, FetchError>> + Send;
}

/// [`PageFetcher`] backed by a shared reqwest client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds the fetcher and its client from configuration
    pub fn from_config(
        crawler: &CrawlerConfig,
        user_agent: Option<&UserAgentConfig>,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self::new(build_http_client(crawler, user_agent)?))
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&self, url: &Url) -> impl Future<Output = Result<FetchedPage, FetchError>> + Send {
        fetch_url(&self.client, url)
    }
}

/// Builds an HTTP client with proper configuration
///
/// Redirects follow reqwest's default policy. The user agent header is only
/// set when configured.
///
/// # Example
///
/// ```no_run
/// use site_ledger::config::CrawlerConfig;
/// use site_ledger::crawler::build_http_client;
///
/// let client = build_http_client(&CrawlerConfig::default(), None).unwrap();
/// ```
pub fn build_http_client(
    crawler: &CrawlerConfig,
    user_agent: Option<&UserAgentConfig>,
) -> Result<Client, reqwest::Error> {
    let timeout = Duration::from_secs(crawler.fetch_timeout_secs);

    let mut builder = Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout)
        .gzip(true)
        .brotli(true);

    if let Some(user_agent) = user_agent {
        builder = builder.user_agent(user_agent.header_value());
    }

    builder.build()
}

/// Fetches a URL and classifies any failure
///
/// # Request Flow
///
/// | Condition | Result |
/// |-----------|--------|
/// | 2xx | `Ok(FetchedPage)` |
/// | Other status | `FetchError::Status` |
/// | Timeout | `FetchError::Timeout` |
/// | Connection failure | `FetchError::Connect` |
/// | Body read failure | `FetchError::Body` |
///
/// Failed fetches are never retried.
pub async fn fetch_url(client: &Client, url: &Url) -> Result<FetchedPage, FetchError> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(FetchError::from_reqwest)?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status.as_u16()));
    }

    let final_url = response.url().clone();
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let body = response.text().await.map_err(FetchError::from_reqwest)?;

    Ok(FetchedPage {
        url: url.clone(),
        final_url,
        status_code: status.as_u16(),
        content_type,
        body,
    })
}
