//! Statistics derived from a finished inventory run
//!
//! This module turns the scheduler's visited map and the metadata pass into
//! the counts shown at the end of a run and in the markdown summary.

use crate::crawler::SiteInventory;
use crate::state::PageState;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Crawl statistics summary
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CrawlStatistics {
    /// Same-origin URLs discovered
    pub discovered: usize,

    /// Fetches issued during the crawl phase
    pub fetched: usize,

    /// Count of fetched pages by state
    pub pages_by_state: BTreeMap<PageState, usize>,

    /// Records produced by the metadata pass
    pub records: usize,

    /// Discovered URLs that produced no record
    pub skipped: usize,
}

impl CrawlStatistics {
    pub fn from_inventory(inventory: &SiteInventory) -> Self {
        Self {
            discovered: inventory.crawl.discovered.len(),
            fetched: inventory.crawl.fetches_issued(),
            pages_by_state: inventory.crawl.count_by_state(),
            records: inventory.records.len(),
            skipped: inventory.skipped_count(),
        }
    }

    /// Crawl-phase fetches that ended in an error state
    pub fn failed(&self) -> usize {
        self.pages_by_state
            .iter()
            .filter(|(state, _)| state.is_error())
            .map(|(_, count)| count)
            .sum()
    }

    /// Share of crawl-phase fetches that succeeded, as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.fetched == 0 {
            return 0.0;
        }
        let processed = self
            .pages_by_state
            .get(&PageState::Processed)
            .copied()
            .unwrap_or(0);
        (processed as f64 / self.fetched as f64) * 100.0
    }
}

/// Everything the markdown summary reports about one run
#[derive(Debug, Clone)]
pub struct CrawlSummary {
    pub seed: String,
    pub page_budget: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// SHA-256 of the config file, when one was used
    pub config_hash: Option<String>,
    pub stats: CrawlStatistics,
}

impl CrawlSummary {
    pub fn from_inventory(
        inventory: &SiteInventory,
        page_budget: usize,
        config_hash: Option<String>,
    ) -> Self {
        Self {
            seed: inventory.crawl.seed.to_string(),
            page_budget,
            started_at: inventory.started_at,
            finished_at: inventory.finished_at,
            config_hash,
            stats: CrawlStatistics::from_inventory(inventory),
        }
    }

    pub fn duration_seconds(&self) -> f64 {
        (self.finished_at - self.started_at).num_milliseconds() as f64 / 1000.0
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Crawl Statistics ===\n");

    println!("Overview:");
    println!("  URLs discovered: {}", stats.discovered);
    println!("  Pages fetched while crawling: {}", stats.fetched);
    println!("  Records produced: {}", stats.records);
    println!("  URLs without a record: {}", stats.skipped);
    println!();

    if !stats.pages_by_state.is_empty() {
        println!("Pages by State:");
        for (state, count) in &stats.pages_by_state {
            let percentage = if stats.fetched > 0 {
                (*count as f64 / stats.fetched as f64) * 100.0
            } else {
                0.0
            };
            println!("  {}: {} ({:.1}%)", state.label(), count, percentage);
        }
        println!();
    }

    println!(
        "Success Rate: {:.1}% ({} failed of {} fetched)",
        stats.success_rate(),
        stats.failed(),
        stats.fetched
    );
}
