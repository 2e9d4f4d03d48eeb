//! Crawler module for web page fetching and processing
//!
//! This module contains the crawl-and-extract engine:
//! - HTTP fetching behind the `PageFetcher` seam
//! - Same-origin link extraction
//! - Bounded frontier traversal
//! - Per-page title and description extraction
//! - Overall inventory coordination

mod coordinator;
mod fetcher;
mod metadata;
mod parser;
mod scheduler;


pub use coordinator::{run_inventory, Coordinator, InventoryOutcome, SiteInventory};
pub use fetcher::{build_http_client, fetch_url, FetchError, FetchedPage, HttpFetcher, PageFetcher};
pub use metadata::{
    extract_metadata, summarize_page, PageRecord, H1_PREFIX, NO_DESCRIPTION, NO_TITLE,
    PARAGRAPH_PREFIX,
};
pub use parser::extract_internal_links;
pub use scheduler::{crawl, CrawlOptions, CrawlReport, Scheduler};
