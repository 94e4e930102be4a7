use url::Url;

/// Extracts the domain from a URL string
///
/// The domain is the host component of the URL, lowercased by the URL
/// parser, with `:port` appended when the URL names a non-default port.
/// A port equal to the scheme's default is dropped by the parser, so
/// `https://example.com:443/` and `http://example.com:80/` both yield
/// `example.com`; the domain never distinguishes an explicit default port
/// from an omitted one. Unparseable input yields an empty string; callers still attempt the
/// fetch in that case.
///
/// # Arguments
///
/// * `url` - The raw URL string to extract the domain from
///
/// # Returns
///
/// The domain, or an empty string when the URL cannot be parsed or has no host
///
/// # Examples
///
/// ```
/// use title_crawler::url::extract_domain;
///
/// assert_eq!(extract_domain("https://example.com/path"), "example.com");
/// assert_eq!(extract_domain("https://EXAMPLE.COM/path"), "example.com");
/// assert_eq!(extract_domain("http://localhost:8080/"), "localhost:8080");
/// assert_eq!(extract_domain("https://example.com:443/"), "example.com");
/// assert_eq!(extract_domain("not a url"), "");
/// ```
pub fn extract_domain(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => host_with_port(&parsed),
        Err(_) => String::new(),
    }
}

fn host_with_port(url: &Url) -> String {
    match (url.host_str(), url.port()) {
        (Some(host), Some(port)) => format!("{}:{}", host, port),
        (Some(host), None) => host.to_string(),
        (None, _) => String::new(),
    }
}
