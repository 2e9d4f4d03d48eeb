//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `PageState`: Tracks the state of individual pages (queued, fetching, processed, failed kinds)
//! - `CrawlState`: The frontier, visited and discovered sets of one crawl run

mod crawl_state;
mod page_state;

// Re-export main types
pub use crawl_state::CrawlState;
pub use page_state::PageState;
