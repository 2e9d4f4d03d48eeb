//! Site-Ledger main entry point
//!
//! This is the command-line interface for the Site-Ledger page inventory.

use anyhow::{bail, Context};
use chrono::Utc;
use clap::Parser;
use site_ledger::config::{load_config_with_hash, validate, Config, Traversal};
use site_ledger::crawler::{Coordinator, InventoryOutcome};
use site_ledger::output::{
    export_csv, generate_markdown_summary, print_statistics, render_table, CrawlStatistics,
    CrawlSummary,
};
use site_ledger::url::parse_seed;
use site_ledger::UrlError;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Site-Ledger: a same-site page inventory
///
/// Crawls every page reachable from SEED through same-origin links, up to a
/// page budget, and exports the title and meta description of each page.
#[derive(Parser, Debug)]
#[command(name = "site-ledger")]
#[command(version)]
#[command(about = "Crawl a website and inventory page titles and descriptions", long_about = None)]
struct Cli {
    /// Website URL to start from (e.g. https://example.com)
    #[arg(value_name = "SEED")]
    seed: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximum number of pages to crawl (1-500)
    #[arg(short = 'n', long, value_name = "N")]
    max_pages: Option<u32>,

    /// Fetch timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Maximum number of fetches in flight
    #[arg(long, value_name = "N")]
    concurrency: Option<u32>,

    /// Use a depth-first frontier instead of breadth-first
    #[arg(long)]
    depth_first: bool,

    /// CSV output path
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Markdown summary output path
    #[arg(long, value_name = "FILE")]
    summary: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate input and show what would be crawled without fetching anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let (config, config_hash) = load_settings(&cli)?;

    let seed = match parse_seed(&cli.seed) {
        Ok(seed) => seed,
        Err(UrlError::Empty) => bail!("Please enter a website URL."),
        Err(e) => bail!("Invalid website URL '{}': {}", cli.seed, e),
    };

    if cli.dry_run {
        print_plan(&config, seed.as_str());
        return Ok(());
    }

    let coordinator =
        Coordinator::from_config(&config).context("Failed to build the HTTP client")?;

    println!("Crawling {} for internal links...", seed);
    let started_at = Utc::now();
    let crawl = coordinator.discover(&seed).await;

    if !crawl.discovered.is_empty() {
        println!("Discovered {} URLs.", crawl.discovered.len());
        println!("Scraping metadata from each URL...");
    }
    let inventory = coordinator.build_inventory(crawl, started_at).await;

    let record_count = match inventory.outcome() {
        InventoryOutcome::Records(count) => count,
        empty => {
            if let Some(message) = empty.message() {
                println!("{}", message);
            }
            return Ok(());
        }
    };

    println!();
    print!("{}", render_table(&inventory.records));
    println!();

    let csv_path = Path::new(&config.output.csv_path);
    export_csv(&inventory.records, csv_path)
        .with_context(|| format!("Failed to write CSV to {}", csv_path.display()))?;
    println!("Saved {} records to {}", record_count, csv_path.display());

    if let Some(summary_path) = &config.output.summary_path {
        let summary = CrawlSummary::from_inventory(
            &inventory,
            config.crawler.max_pages as usize,
            config_hash,
        );
        generate_markdown_summary(&summary, Path::new(summary_path))
            .with_context(|| format!("Failed to write summary to {}", summary_path))?;
        println!("Summary written to {}", summary_path);
    }

    if !cli.quiet {
        println!();
        print_statistics(&CrawlStatistics::from_inventory(&inventory));
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("site_ledger=info,warn"),
            1 => EnvFilter::new("site_ledger=debug,info"),
            2 => EnvFilter::new("site_ledger=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads the config file (if any) and applies command-line overrides
fn load_settings(cli: &Cli) -> anyhow::Result<(Config, Option<String>)> {
    let (mut config, hash) = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (config, Some(hash))
        }
        None => (Config::default(), None),
    };

    if let Some(max_pages) = cli.max_pages {
        config.crawler.max_pages = max_pages;
    }
    if let Some(timeout) = cli.timeout {
        config.crawler.fetch_timeout_secs = timeout;
    }
    if let Some(concurrency) = cli.concurrency {
        config.crawler.max_concurrent_fetches = concurrency;
    }
    if cli.depth_first {
        config.crawler.traversal = Traversal::DepthFirst;
    }
    if let Some(output) = &cli.output {
        config.output.csv_path = output.display().to_string();
    }
    if let Some(summary) = &cli.summary {
        config.output.summary_path = Some(summary.display().to_string());
    }

    validate(&config).context("Invalid settings")?;
    Ok((config, hash))
}

/// Handles the --dry-run mode: shows what would be crawled
fn print_plan(config: &Config, seed: &str) {
    println!("=== Site-Ledger Dry Run ===\n");

    println!("Seed: {}", seed);
    println!("\nCrawler Configuration:");
    println!("  Page budget: {}", config.crawler.max_pages);
    println!("  Fetch timeout: {}s", config.crawler.fetch_timeout_secs);
    println!(
        "  Max concurrent fetches: {}",
        config.crawler.max_concurrent_fetches
    );
    println!("  Traversal: {:?}", config.crawler.traversal);

    match &config.user_agent {
        Some(agent) => println!("\nUser Agent: {}", agent.header_value()),
        None => println!("\nUser Agent: (client default)"),
    }

    println!("\nOutput:");
    println!("  CSV: {}", config.output.csv_path);
    if let Some(summary) = &config.output.summary_path {
        println!("  Summary: {}", summary);
    }

    println!("\n✓ Settings are valid");
}
