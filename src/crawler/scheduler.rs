//! Bounded frontier traversal
//!
//! This module handles:
//! - Handing out each URL at most once per run
//! - Enforcing the page budget on fetches issued, not fetches completed
//! - Keeping up to `max_concurrent_fetches` fetches in flight
//! - Merging extracted links back into the frontier

use crate::config::{CrawlerConfig, Traversal};
use crate::crawler::fetcher::{FetchError, FetchedPage, PageFetcher};
use crate::crawler::parser::extract_internal_links;
use crate::state::{CrawlState, PageState};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;
use url::Url;

/// Traversal limits for one crawl
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlOptions {
    /// Maximum number of fetches issued
    pub max_pages: usize,

    /// Maximum number of fetches in flight at once
    pub max_concurrent_fetches: usize,

    /// Frontier discipline
    pub traversal: Traversal,
}

impl CrawlOptions {
    /// Sequential breadth-first crawl with the given budget
    pub fn with_budget(max_pages: usize) -> Self {
        Self {
            max_pages,
            ..Self::default()
        }
    }
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self::from(&CrawlerConfig::default())
    }
}

impl From<&CrawlerConfig> for CrawlOptions {
    fn from(config: &CrawlerConfig) -> Self {
        Self {
            max_pages: config.max_pages as usize,
            max_concurrent_fetches: config.max_concurrent_fetches as usize,
            traversal: config.traversal,
        }
    }
}

/// Everything a crawl run learned
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// The normalized seed URL
    pub seed: Url,

    /// Same-origin link targets seen on fetched pages
    pub discovered: HashSet<Url>,

    /// Every URL a fetch was issued for, with its final state
    pub visited: HashMap<Url, PageState>,
}

impl CrawlReport {
    /// Discovered URLs in lexical order
    pub fn sorted_discovered(&self) -> Vec<Url> {
        let mut urls: Vec<Url> = self.discovered.iter().cloned().collect();
        urls.sort();
        urls
    }

    /// Number of fetches the crawl issued
    pub fn fetches_issued(&self) -> usize {
        self.visited.len()
    }

    /// Visited URLs counted per state
    pub fn count_by_state(&self) -> BTreeMap<PageState, usize> {
        let mut counts = BTreeMap::new();
        for state in self.visited.values() {
            *counts.entry(*state).or_insert(0) += 1;
        }
        counts
    }
}

/// Scheduler runs bounded frontier traversal over a [`PageFetcher`]
///
/// The scheduler task is the only owner of the frontier and visited set:
/// it pops, checks and marks before spawning each fetch, and merges every
/// result itself. Fetches are the only work that runs on other tasks.
pub struct Scheduler<F> {
    fetcher: Arc<F>,
    options: CrawlOptions,
}

impl<F: PageFetcher + 'static> Scheduler<F> {
    pub fn new(fetcher: Arc<F>, options: CrawlOptions) -> Self {
        Self { fetcher, options }
    }

    /// Crawls from `seed` until the frontier empties or the budget runs out
    pub async fn run(&self, seed: &Url) -> CrawlReport {
        let budget = self.options.max_pages;
        let width = self.options.max_concurrent_fetches.max(1);
        let start_time = Instant::now();

        let mut state = CrawlState::new(seed.clone(), self.options.traversal);
        let mut in_flight: JoinSet<(Url, Result<FetchedPage, FetchError>)> = JoinSet::new();
        let mut completed = 0usize;

        tracing::info!(
            "Crawling {} (budget {}, {} concurrent)",
            seed,
            budget,
            width
        );

        loop {
            while in_flight.len() < width && state.visited_count() < budget {
                let Some(url) = state.next_unvisited() else {
                    break;
                };
                tracing::debug!("Fetching {}", url);

                let fetcher = Arc::clone(&self.fetcher);
                in_flight.spawn(async move {
                    let result = fetcher.fetch(&url).await;
                    (url, result)
                });
            }

            let Some(joined) = in_flight.join_next().await else {
                break;
            };

            match joined {
                Ok((url, Ok(page))) => {
                    if page.final_url != url {
                        tracing::debug!("{} redirected to {}", url, page.final_url);
                    }
                    let links = extract_internal_links(&url, &page.body);
                    tracing::debug!(
                        "{} links on {} (HTTP {}, {})",
                        links.len(),
                        url,
                        page.status_code,
                        page.content_type.as_deref().unwrap_or("no content type")
                    );
                    state.complete(&url, PageState::Processed);
                    state.record_links(links);
                }
                Ok((url, Err(e))) => {
                    tracing::debug!("Fetch failed for {}: {}", url, e);
                    state.complete(&url, e.page_state());
                }
                Err(e) => {
                    tracing::warn!("Fetch task aborted: {}", e);
                }
            }

            completed += 1;
            if completed % 10 == 0 {
                tracing::info!(
                    "Progress: {} pages fetched, {} in frontier, {} discovered",
                    completed,
                    state.frontier_size(),
                    state.discovered().len()
                );
            }
        }

        let abandoned = state.fail_unfinished();
        if abandoned > 0 {
            tracing::warn!("{} fetches never completed, marked as failed", abandoned);
        }

        let (visited, discovered) = state.into_parts();

        tracing::info!(
            "Crawl finished: {} pages fetched, {} URLs discovered in {:?}",
            visited.len(),
            discovered.len(),
            start_time.elapsed()
        );

        CrawlReport {
            seed: seed.clone(),
            discovered,
            visited,
        }
    }
}

/// Crawls from `seed` one fetch at a time and returns the discovered URLs
///
/// The returned set may contain URLs that were never fetched because the
/// budget ran out first.
pub async fn crawl<F: PageFetcher + 'static>(
    fetcher: Arc<F>,
    seed: &Url,
    page_budget: usize,
) -> HashSet<Url> {
    Scheduler::new(fetcher, CrawlOptions::with_budget(page_budget))
        .run(seed)
        .await
        .discovered
}
