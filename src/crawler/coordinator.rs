//! Crawler coordinator - runs the full inventory pipeline
//!
//! 1. Crawl from the seed to get the discovered URL set
//! 2. Extract metadata for every discovered URL
//! 3. Hand back the records, sorted by URL, with the crawl report
//!
//! Presentation (tables, CSV, summaries) stays with the caller.

use crate::config::Config;
use crate::crawler::fetcher::{HttpFetcher, PageFetcher};
use crate::crawler::metadata::{extract_metadata, PageRecord};
use crate::crawler::scheduler::{CrawlOptions, CrawlReport, Scheduler};
use crate::LedgerError;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use url::Url;

/// What the user is told about a finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventoryOutcome {
    /// The crawl discovered no same-origin links
    NoLinksFound,
    /// Links were found but no page produced a record
    NoAccessiblePages,
    /// At least one record was produced
    Records(usize),
}

impl InventoryOutcome {
    /// Message shown for the empty outcomes
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Self::NoLinksFound => Some("No links found on the provided website."),
            Self::NoAccessiblePages => Some("No accessible pages found on the provided website."),
            Self::Records(_) => None,
        }
    }
}

/// Result of one inventory run
#[derive(Debug, Clone)]
pub struct SiteInventory {
    /// What the crawl phase learned
    pub crawl: CrawlReport,

    /// One record per discovered URL that could be fetched, sorted by URL
    pub records: Vec<PageRecord>,

    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl SiteInventory {
    pub fn outcome(&self) -> InventoryOutcome {
        if self.crawl.discovered.is_empty() {
            InventoryOutcome::NoLinksFound
        } else if self.records.is_empty() {
            InventoryOutcome::NoAccessiblePages
        } else {
            InventoryOutcome::Records(self.records.len())
        }
    }

    /// Discovered URLs for which no record was produced
    pub fn skipped_count(&self) -> usize {
        self.crawl.discovered.len().saturating_sub(self.records.len())
    }
}

/// Main coordinator structure
pub struct Coordinator<F> {
    fetcher: Arc<F>,
    options: CrawlOptions,
}

impl Coordinator<HttpFetcher> {
    /// Creates a coordinator that fetches over HTTP
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(LedgerError)` - The HTTP client could not be built
    pub fn from_config(config: &Config) -> Result<Self, LedgerError> {
        let fetcher = HttpFetcher::from_config(&config.crawler, config.user_agent.as_ref())?;
        Ok(Self::new(
            Arc::new(fetcher),
            CrawlOptions::from(&config.crawler),
        ))
    }
}

impl<F: PageFetcher + 'static> Coordinator<F> {
    pub fn new(fetcher: Arc<F>, options: CrawlOptions) -> Self {
        Self { fetcher, options }
    }

    pub fn options(&self) -> &CrawlOptions {
        &self.options
    }

    /// Runs the crawl and the metadata pass
    pub async fn run(&self, seed: &Url) -> SiteInventory {
        let started_at = Utc::now();
        let crawl = self.discover(seed).await;
        self.build_inventory(crawl, started_at).await
    }

    /// Runs the crawl phase only
    pub async fn discover(&self, seed: &Url) -> CrawlReport {
        Scheduler::new(Arc::clone(&self.fetcher), self.options.clone())
            .run(seed)
            .await
    }

    /// Runs the metadata pass over a finished crawl
    ///
    /// Nothing is fetched when the crawl discovered no links.
    pub async fn build_inventory(
        &self,
        crawl: CrawlReport,
        started_at: DateTime<Utc>,
    ) -> SiteInventory {
        let records = if crawl.discovered.is_empty() {
            Vec::new()
        } else {
            tracing::info!(
                "Extracting metadata from {} discovered URLs",
                crawl.discovered.len()
            );
            self.collect_metadata(crawl.sorted_discovered()).await
        };

        SiteInventory {
            crawl,
            records,
            started_at,
            finished_at: Utc::now(),
        }
    }

    /// Extracts metadata for each URL, at most `max_concurrent_fetches` at a time
    ///
    /// URLs whose fetch fails produce no record. The result is sorted by URL.
    pub async fn collect_metadata(&self, urls: Vec<Url>) -> Vec<PageRecord> {
        let width = self.options.max_concurrent_fetches.max(1);
        let permits = Arc::new(Semaphore::new(width));
        let mut tasks = JoinSet::new();
        let total = urls.len();

        for url in urls {
            let fetcher = Arc::clone(&self.fetcher);
            let permits = Arc::clone(&permits);
            tasks.spawn(async move {
                let _permit = permits.acquire_owned().await.ok()?;
                extract_metadata(fetcher.as_ref(), &url).await
            });
        }

        let mut records = Vec::with_capacity(total);
        let mut done = 0usize;
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Some(record)) => records.push(record),
                Ok(None) => {}
                Err(e) => tracing::warn!("Metadata task aborted: {}", e),
            }

            done += 1;
            if done % 10 == 0 {
                tracing::info!("Metadata progress: {}/{} pages", done, total);
            }
        }

        records.sort_by(|a, b| a.url().cmp(b.url()));
        tracing::info!("Extracted {} records from {} URLs", records.len(), total);
        records
    }
}

/// Runs a complete inventory over HTTP
///
/// # Example
///
/// ```no_run
/// use site_ledger::config::Config;
/// use site_ledger::crawler::run_inventory;
/// use site_ledger::url::parse_seed;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let seed = parse_seed("https://example.com/")?;
/// let inventory = run_inventory(&Config::default(), &seed).await?;
/// println!("{} records", inventory.records.len());
/// # Ok(())
/// # }
/// ```
pub async fn run_inventory(config: &Config, seed: &Url) -> Result<SiteInventory, LedgerError> {
    let coordinator = Coordinator::from_config(config)?;
    Ok(coordinator.run(seed).await)
}
