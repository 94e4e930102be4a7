//! Output module for crawl reports
//!
//! This module handles:
//! - Aggregating per-URL results into the report and its summary
//! - Writing the report as JSON
//! - Printing the console summary
//! - Generating an optional markdown summary

mod json;
mod markdown;
mod report;
pub mod stats;

pub use json::{report_to_json, save_report};
pub use markdown::{format_markdown_summary, generate_markdown_summary};
pub use report::{CrawlReport, DomainStats, Summary};
pub use stats::{format_summary, print_summary};

use crate::config::OutputConfig;
use crate::CrawlError;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Writes the JSON report and, when configured, the markdown summary
///
/// # Arguments
///
/// * `report` - The aggregated crawl report
/// * `config` - Output paths
///
/// # Returns
///
/// * `Ok(())` - Every configured output was written
/// * `Err(CrawlError::Output)` - A file could not be written; names the path
pub fn write_outputs(report: &CrawlReport, config: &OutputConfig) -> Result<(), CrawlError> {
    save_report(report, Path::new(&config.results_path)).map_err(|source| {
        CrawlError::Output {
            path: config.results_path.clone(),
            source,
        }
    })?;

    if let Some(summary_path) = &config.summary_path {
        generate_markdown_summary(report, Path::new(summary_path)).map_err(|source| {
            CrawlError::Output {
                path: summary_path.clone(),
                source,
            }
        })?;
    }

    Ok(())
}
