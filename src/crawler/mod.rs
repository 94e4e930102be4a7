//! Crawler module for concurrent page fetching
//!
//! This module contains the fetch-and-aggregate engine, including:
//! - Title extraction from HTML
//! - Response classification by content type
//! - Single-URL fetching with timing and error capture
//! - The bounded worker pool that drives it all

mod classifier;
mod fetcher;
mod pool;
mod title;

pub use classifier::{classify_response, ContentKind};
pub use fetcher::{
    build_http_client, describe_transport_error, fetch_url, FailureKind, PageResult,
    NETWORK_ERROR_STATUS, SUCCESS_STATUS,
};
pub use pool::WorkerPool;
pub use title::{extract_title, NO_TITLE_FOUND};

use crate::config::Config;
use crate::output::CrawlReport;
use crate::{ConfigError, CrawlError};
use std::num::NonZeroUsize;

/// Runs a complete crawl over `urls`
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the shared HTTP client
/// 2. Start the worker pool
/// 3. Fetch every URL exactly once
/// 4. Aggregate the results into a report
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `urls` - Trimmed, non-empty URL strings
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Every URL was attempted; per-URL failures are in the report
/// * `Err(CrawlError)` - The run could not be started
pub async fn crawl(config: &Config, urls: Vec<String>) -> Result<CrawlReport, CrawlError> {
    let workers = NonZeroUsize::new(config.crawler.workers)
        .ok_or_else(|| ConfigError::Validation("workers must be at least 1".to_string()))?;

    let client = build_http_client(&config.crawler, &config.user_agent)?;

    let pool =
        WorkerPool::new(client, workers).with_progress_interval(config.crawler.progress_interval);

    Ok(pool.run(urls).await)
}
