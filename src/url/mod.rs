//! URL handling module for Title-Crawler
//!
//! This module provides domain extraction for individual URLs and loading
//! of the line-delimited URL list the crawler consumes.

mod domain;
mod list;

// Re-export main functions
pub use domain::extract_domain;
pub use list::{load_urls, parse_url_list};
