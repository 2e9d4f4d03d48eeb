//! Configuration module for Site-Ledger
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! The file is optional: [`Config::default`] carries the reference settings
//! (budget 50, 10 second fetch timeout, one fetch at a time).
//!
//! # Example
//!
//! ```no_run
//! use site_ledger::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("site-ledger.toml")).unwrap();
//! println!("Page budget: {}", config.crawler.max_pages);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, OutputConfig, Traversal, UserAgentConfig};
pub use validation::{validate, MAX_PAGE_BUDGET};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
