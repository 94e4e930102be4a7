//! Markdown summary generation
//!
//! This module generates a human-readable markdown summary of a crawl,
//! including overall statistics, a status breakdown, per-domain timings
//! and the list of failed URLs.

use crate::crawler::NETWORK_ERROR_STATUS;
use crate::output::report::CrawlReport;
use crate::output::OutputResult;
use chrono::{DateTime, Utc};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Generates a markdown summary from a crawl report
///
/// # Arguments
///
/// * `report` - The aggregated crawl report
/// * `output_path` - Path where the markdown file should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote markdown summary
/// * `Err(OutputError)` - Failed to write summary
pub fn generate_markdown_summary(report: &CrawlReport, output_path: &Path) -> OutputResult<()> {
    let markdown = format_markdown_summary(report, Utc::now());

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats a crawl report as markdown
///
/// # Arguments
///
/// * `report` - The aggregated crawl report
/// * `generated_at` - Timestamp shown in the header
///
/// # Returns
///
/// A formatted markdown string
pub fn format_markdown_summary(report: &CrawlReport, generated_at: DateTime<Utc>) -> String {
    let summary = &report.summary;
    let mut md = String::new();

    md.push_str("# Title-Crawler Summary\n\n");
    md.push_str(&format!(
        "- **Generated**: {}\n\n",
        generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    // Overall statistics
    md.push_str("## Overall Statistics\n\n");
    md.push_str(&format!("- **Total URLs**: {}\n", summary.total_urls));
    md.push_str(&format!(
        "- **Successful Fetches**: {}\n",
        summary.successful_fetches
    ));
    md.push_str(&format!("- **Failed Fetches**: {}\n", summary.failed_fetches));
    md.push_str(&format!(
        "- **Success Rate**: {:.2}%\n",
        summary.success_rate()
    ));
    md.push_str(&format!(
        "- **Total Time**: {:.2} seconds\n",
        summary.total_time
    ));
    md.push_str(&format!(
        "- **Average Time per URL**: {:.4} seconds\n\n",
        summary.average_time_per_url
    ));

    if report.results.is_empty() {
        md.push_str("_No URLs were fetched._\n");
        return md;
    }

    // Status breakdown
    md.push_str("## Status Breakdown\n\n");
    md.push_str("| Status | Count |\n");
    md.push_str("|--------|-------|\n");
    for (status, count) in report.status_breakdown() {
        md.push_str(&format!("| {} | {} |\n", status_label(status), count));
    }
    md.push('\n');

    // Domain breakdown
    md.push_str("## Domains\n\n");
    md.push_str("| Domain | Requests | Successful | Mean Time (s) |\n");
    md.push_str("|--------|----------|------------|---------------|\n");
    for stats in report.domain_breakdown() {
        let domain = if stats.domain.is_empty() {
            "(unparseable)"
        } else {
            stats.domain.as_str()
        };
        md.push_str(&format!(
            "| {} | {} | {} | {:.3} |\n",
            domain, stats.requests, stats.successes, stats.mean_time
        ));
    }
    md.push('\n');

    // Failures
    let failures: Vec<_> = report.failures().collect();
    if !failures.is_empty() {
        md.push_str(&format!("## Failed URLs ({})\n\n", failures.len()));
        for result in failures {
            md.push_str(&format!(
                "- `{}` ({}): {}\n",
                result.url,
                status_label(result.status),
                result.title
            ));
        }
        md.push('\n');
    }

    md
}

fn status_label(status: i32) -> String {
    if status == NETWORK_ERROR_STATUS {
        "network error".to_string()
    } else {
        status.to_string()
    }
}
