use crate::CrawlError;
use std::path::Path;

/// Loads the URL list from a line-delimited file
///
/// # Arguments
///
/// * `path` - Path to the URL list, one URL per line
///
/// # Returns
///
/// * `Ok(Vec<String>)` - Trimmed, non-blank lines in file order
/// * `Err(CrawlError::UrlList)` - The file is missing or unreadable
pub fn load_urls(path: &Path) -> Result<Vec<String>, CrawlError> {
    let content = std::fs::read_to_string(path).map_err(|source| CrawlError::UrlList {
        path: path.display().to_string(),
        source,
    })?;

    Ok(parse_url_list(&content))
}

/// Splits text into URLs, trimming whitespace and dropping blank lines
pub fn parse_url_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
