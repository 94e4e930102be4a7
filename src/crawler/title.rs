//! Title extraction from raw HTML
//!
//! This is a fragment scan, not a document parse: the first
//! `<title ...>...</title>` pair wins regardless of where it appears.

use regex::Regex;
use std::sync::LazyLock;

/// Returned when the document carries no `<title>` element
pub const NO_TITLE_FOUND: &str = "No title found";

/// Case-insensitive tag, attributes ignored, lazy inner match spanning lines
static TITLE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<title[^>]*>(.*?)</title>").expect("hardcoded regex pattern is valid")
});

/// Extracts the trimmed contents of the first `<title>` tag
///
/// Malformed HTML never fails: the worst case is an empty string (for an
/// empty tag) or [`NO_TITLE_FOUND`].
///
/// # Example
///
/// ```
/// use title_crawler::crawler::extract_title;
///
/// assert_eq!(extract_title("<TITLE>  Hello World  </TITLE>"), "Hello World");
/// assert_eq!(extract_title("<p>no head here</p>"), "No title found");
/// ```
pub fn extract_title(html: &str) -> String {
    TITLE_REGEX
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|inner| inner.as_str().trim().to_string())
        .unwrap_or_else(|| NO_TITLE_FOUND.to_string())
}
