//! Aggregated crawl report
//!
//! The report is the persisted contract: a [`Summary`] plus every
//! [`PageResult`] in completion order.

use crate::crawler::PageResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Run-wide statistics, computed once after every result is collected
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_urls: usize,

    /// Results with status exactly 200
    pub successful_fetches: usize,

    /// Every other result, including other 2xx and network errors
    pub failed_fetches: usize,

    /// Wall-clock seconds from pool start to the last collected result
    pub total_time: f64,

    /// `total_time / total_urls`, or 0.0 when there are no URLs
    pub average_time_per_url: f64,
}

impl Summary {
    /// Computes the summary for a finished run
    ///
    /// `total_urls` is the number of URLs submitted. A URL without a result
    /// counts as failed, so successes and failures always add up to it.
    pub fn from_results(results: &[PageResult], total_urls: usize, total_time: f64) -> Self {
        let successful_fetches = results.iter().filter(|r| r.is_success()).count();

        let average_time_per_url = if total_urls > 0 {
            total_time / total_urls as f64
        } else {
            0.0
        };

        Self {
            total_urls,
            successful_fetches,
            failed_fetches: total_urls.saturating_sub(successful_fetches),
            total_time,
            average_time_per_url,
        }
    }

    /// Percentage of URLs fetched with status 200
    pub fn success_rate(&self) -> f64 {
        if self.total_urls == 0 {
            0.0
        } else {
            (self.successful_fetches as f64 / self.total_urls as f64) * 100.0
        }
    }
}

/// Per-domain aggregate for reporting
#[derive(Debug, Clone, PartialEq)]
pub struct DomainStats {
    pub domain: String,
    pub requests: usize,
    pub successes: usize,
    /// Mean `time_taken` across this domain's results
    pub mean_time: f64,
}

/// Summary plus all per-URL results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrawlReport {
    pub summary: Summary,
    pub results: Vec<PageResult>,
}

impl CrawlReport {
    /// Aggregates collected results for `total_urls` submitted URLs
    pub fn from_results(results: Vec<PageResult>, total_urls: usize, total_time: f64) -> Self {
        let summary = Summary::from_results(&results, total_urls, total_time);
        Self { summary, results }
    }

    /// Counts results by status code, ascending (network errors first)
    pub fn status_breakdown(&self) -> BTreeMap<i32, usize> {
        let mut counts = BTreeMap::new();
        for result in &self.results {
            *counts.entry(result.status).or_insert(0) += 1;
        }
        counts
    }

    /// Aggregates results by domain, busiest domain first
    ///
    /// Ties are broken by domain name. Results with an empty domain are
    /// grouped under the empty string.
    pub fn domain_breakdown(&self) -> Vec<DomainStats> {
        let mut by_domain: BTreeMap<&str, (usize, usize, f64)> = BTreeMap::new();
        for result in &self.results {
            let entry = by_domain.entry(result.domain.as_str()).or_insert((0, 0, 0.0));
            entry.0 += 1;
            if result.is_success() {
                entry.1 += 1;
            }
            entry.2 += result.time_taken;
        }

        let mut stats: Vec<DomainStats> = by_domain
            .into_iter()
            .map(|(domain, (requests, successes, time))| DomainStats {
                domain: domain.to_string(),
                requests,
                successes,
                mean_time: time / requests as f64,
            })
            .collect();

        // BTreeMap order already sorts by name; stable sort keeps it for ties
        stats.sort_by(|a, b| b.requests.cmp(&a.requests));
        stats
    }

    /// Results that did not count as successful
    pub fn failures(&self) -> impl Iterator<Item = &PageResult> {
        self.results.iter().filter(|r| !r.is_success())
    }
}
