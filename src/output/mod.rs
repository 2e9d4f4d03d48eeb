//! Output module for presenting inventory results
//!
//! This module handles:
//! - Exporting page records as CSV (`URL,Title,Meta Description`)
//! - Rendering records as a plain-text table
//! - Building crawl statistics and the markdown run summary

mod csv_export;
mod markdown;
pub mod stats;
mod table;

pub use csv_export::{export_csv, records_to_csv, write_csv, CSV_HEADER};
pub use markdown::{format_markdown_summary, generate_markdown_summary};
pub use stats::{print_statistics, CrawlStatistics, CrawlSummary};
pub use table::render_table;

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to format output: {0}")]
    Format(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
