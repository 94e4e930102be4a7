//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the shared HTTP client with pooling and timeouts
//! - Issuing a single GET per URL (no retries)
//! - Timing each fetch
//! - Encoding transport failures as results with a sentinel status

use crate::config::{CrawlerConfig, UserAgentConfig};
use crate::crawler::classifier::classify_response;
use crate::url::extract_domain;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::time::{Duration, Instant};

/// Status recorded when no HTTP response was obtained
pub const NETWORK_ERROR_STATUS: i32 = -1;

/// The only status counted as a successful fetch
pub const SUCCESS_STATUS: i32 = 200;

/// Outcome of fetching a single URL
///
/// Success and failure share one shape: on a transport failure `status` is
/// [`NETWORK_ERROR_STATUS`] and `title` carries the error text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResult {
    /// The URL exactly as it was queued
    pub url: String,

    /// Display title, or error text on failure
    pub title: String,

    /// HTTP status code, or [`NETWORK_ERROR_STATUS`]
    pub status: i32,

    /// Seconds from dispatch to completion of this fetch
    pub time_taken: f64,

    /// Host component of the URL, empty if it could not be parsed
    pub domain: String,
}

impl PageResult {
    /// Returns true only for HTTP 200
    pub fn is_success(&self) -> bool {
        self.status == SUCCESS_STATUS
    }

    /// Returns true if no HTTP response was obtained
    pub fn is_network_error(&self) -> bool {
        self.status == NETWORK_ERROR_STATUS
    }
}

/// Broad category of a transport-level failure, used for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Timeout,
    Connect,
    InvalidRequest,
    Other,
}

impl FailureKind {
    /// Classifies a reqwest error
    pub fn of(error: &reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else if error.is_connect() {
            Self::Connect
        } else if error.is_builder() {
            Self::InvalidRequest
        } else {
            Self::Other
        }
    }
}

/// Builds the shared HTTP client
///
/// The client is cheap to clone; clones share one connection pool.
///
/// # Arguments
///
/// * `crawler` - Timeouts and pool sizing
/// * `user_agent` - The user agent identification
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use title_crawler::config::{CrawlerConfig, UserAgentConfig};
/// use title_crawler::crawler::build_http_client;
///
/// let client =
///     build_http_client(&CrawlerConfig::default(), &UserAgentConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    crawler: &CrawlerConfig,
    user_agent: &UserAgentConfig,
) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(Duration::from_secs(crawler.request_timeout_secs))
        .pool_max_idle_per_host(crawler.pool_max_idle_per_host)
        .pool_idle_timeout(Duration::from_secs(crawler.pool_idle_timeout_secs))
        .gzip(true)
        .brotli(true);

    if let Some(connect) = crawler.connect_timeout_secs {
        builder = builder.connect_timeout(Duration::from_secs(connect));
    }

    builder.build()
}

/// Fetches one URL and records the outcome
///
/// The domain is extracted before the request so it is present even when
/// the request fails outright. `started` is captured by the caller when the
/// URL is dequeued; `time_taken` runs from there to the end of body reading.
///
/// # Arguments
///
/// * `client` - The shared HTTP client
/// * `url` - The URL to fetch, used verbatim
/// * `started` - When this fetch was dispatched
pub async fn fetch_url(client: &Client, url: &str, started: Instant) -> PageResult {
    let domain = extract_domain(url);

    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            let message = describe_transport_error(&e);
            tracing::warn!("{:?} failure fetching {}: {}", FailureKind::of(&e), url, message);
            return PageResult {
                url: url.to_string(),
                title: format!("Error: {}", message),
                status: NETWORK_ERROR_STATUS,
                time_taken: started.elapsed().as_secs_f64(),
                domain,
            };
        }
    };

    let status = i32::from(response.status().as_u16());
    let title = classify_response(response).await;

    PageResult {
        url: url.to_string(),
        title,
        status,
        time_taken: started.elapsed().as_secs_f64(),
        domain,
    }
}

/// Renders an error together with its source chain
///
/// Causes whose text already appears in the message are skipped, since
/// some error types fold their source into their own `Display`.
pub fn describe_transport_error(error: &(dyn StdError + 'static)) -> String {
    let mut message = error.to_string();
    let mut source = error.source();

    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }

    message
}
