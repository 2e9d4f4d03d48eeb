use serde::Deserialize;

/// Main configuration structure for Site-Ledger
///
/// Every section has defaults, so an empty file (or no file) is valid.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: Option<UserAgentConfig>,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Order in which the frontier hands out URLs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Traversal {
    /// FIFO frontier
    #[default]
    BreadthFirst,
    /// LIFO frontier
    DepthFirst,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CrawlerConfig {
    /// Maximum number of fetches the crawl may issue
    #[serde(rename = "max-pages", default = "default_max_pages")]
    pub max_pages: u32,

    /// Timeout applied to every fetch (seconds)
    #[serde(rename = "fetch-timeout-secs", default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,

    /// Maximum number of fetches in flight at once
    #[serde(rename = "max-concurrent-fetches", default = "default_concurrency")]
    pub max_concurrent_fetches: u32,

    /// Frontier discipline
    #[serde(default)]
    pub traversal: Traversal,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_pages: default_max_pages(),
            fetch_timeout_secs: default_fetch_timeout(),
            max_concurrent_fetches: default_concurrency(),
            traversal: Traversal::default(),
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url", default)]
    pub contact_url: Option<String>,
}

impl UserAgentConfig {
    /// Formats the header value: `Name/Version` or `Name/Version (+ContactURL)`
    pub fn header_value(&self) -> String {
        match &self.contact_url {
            Some(contact) => format!(
                "{}/{} (+{})",
                self.crawler_name, self.crawler_version, contact
            ),
            None => format!("{}/{}", self.crawler_name, self.crawler_version),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Path of the CSV export
    #[serde(rename = "csv-path", default = "default_csv_path")]
    pub csv_path: String,

    /// Path of the markdown run summary; no summary when unset
    #[serde(rename = "summary-path", default)]
    pub summary_path: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: default_csv_path(),
            summary_path: None,
        }
    }
}

fn default_max_pages() -> u32 {
    50
}

fn default_fetch_timeout() -> u64 {
    10
}

fn default_concurrency() -> u32 {
    1
}

fn default_csv_path() -> String {
    "scraped_data.csv".to_string()
}
