//! Title-Crawler: a concurrent page title fetcher
//!
//! This crate fetches a list of web pages with a bounded pool of workers,
//! extracts a title (or a content-type summary) from each response and
//! aggregates per-URL timings into a single report.

pub mod config;
pub mod crawler;
pub mod output;
pub mod url;

use thiserror::Error;

/// Main error type for run-level failures
///
/// Per-URL failures never surface here; they are recorded in
/// [`crawler::PageResult`] instead.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to load URL list from {path}: {source}")]
    UrlList {
        path: String,
        source: std::io::Error,
    },

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Failed to write {path}: {source}")]
    Output {
        path: String,
        source: output::OutputError,
    },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for Title-Crawler operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl, PageResult, WorkerPool};
pub use output::{CrawlReport, Summary};
pub use crate::url::{extract_domain, load_urls};
