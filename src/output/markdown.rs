//! Markdown summary generation
//!
//! This module generates a human-readable markdown summary of one inventory
//! run: inputs, timings, crawl statistics and the record counts.

use crate::output::stats::CrawlSummary;
use crate::output::OutputResult;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes the markdown summary to `output_path`
pub fn generate_markdown_summary(summary: &CrawlSummary, output_path: &Path) -> OutputResult<()> {
    let markdown = format_markdown_summary(summary);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats a crawl summary as markdown
pub fn format_markdown_summary(summary: &CrawlSummary) -> String {
    let stats = &summary.stats;
    let mut md = String::new();

    md.push_str("# Site-Ledger Crawl Summary\n\n");

    // Run metadata
    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **Seed**: {}\n", summary.seed));
    md.push_str(&format!("- **Page Budget**: {}\n", summary.page_budget));
    md.push_str(&format!("- **Started**: {}\n", summary.started_at.to_rfc3339()));
    md.push_str(&format!(
        "- **Finished**: {}\n",
        summary.finished_at.to_rfc3339()
    ));
    md.push_str(&format!(
        "- **Duration**: {:.1} seconds\n",
        summary.duration_seconds()
    ));
    if let Some(hash) = &summary.config_hash {
        md.push_str(&format!("- **Config Hash**: {}\n", hash));
    }
    md.push('\n');

    // Overall statistics
    md.push_str("## Overall Statistics\n\n");
    md.push_str(&format!("- **URLs Discovered**: {}\n", stats.discovered));
    md.push_str(&format!("- **Pages Fetched**: {}\n", stats.fetched));
    md.push_str(&format!("- **Records Produced**: {}\n", stats.records));
    md.push_str(&format!("- **URLs Without Record**: {}\n", stats.skipped));
    md.push_str(&format!(
        "- **Success Rate**: {:.2}%\n\n",
        stats.success_rate()
    ));

    // State breakdown
    if !stats.pages_by_state.is_empty() {
        md.push_str("## Page State Breakdown\n\n");
        md.push_str("| State | Count |\n");
        md.push_str("|-------|-------|\n");
        for (state, count) in &stats.pages_by_state {
            md.push_str(&format!("| {} | {} |\n", state.label(), count));
        }
        md.push('\n');
    }

    md
}
