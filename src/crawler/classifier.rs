//! Response classification
//!
//! Turns a successful HTTP response into the display string stored in a
//! result's `title` field. The branch is chosen from the `Content-Type`
//! header, checked in order:
//!
//! | Content-Type contains | Body read | Title |
//! |-----------------------|-----------|-------|
//! | `text/html` | yes | first `<title>` contents |
//! | `application/json` | yes | `JSON Response: <N> characters` |
//! | anything else | no | `Non-HTML content: <content-type>` |

use crate::crawler::title::extract_title;
use reqwest::header::CONTENT_TYPE;
use reqwest::Response;
use std::fmt::Display;

/// Content category derived from the `Content-Type` header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Html,
    Json,
    Other,
}

impl ContentKind {
    /// Classifies a raw `Content-Type` header value
    pub fn from_content_type(content_type: &str) -> Self {
        if content_type.contains("text/html") {
            Self::Html
        } else if content_type.contains("application/json") {
            Self::Json
        } else {
            Self::Other
        }
    }

    /// Whether the body must be read to describe the response
    pub fn reads_body(&self) -> bool {
        !matches!(self, Self::Other)
    }
}

/// Describes an HTML body by its title
pub fn describe_html(body: &[u8]) -> String {
    extract_title(&String::from_utf8_lossy(body))
}

/// Describes a JSON body by its length in bytes
pub fn describe_json(body: &[u8]) -> String {
    format!("JSON Response: {} characters", body.len())
}

/// Describes a response whose body is not read
pub fn describe_other(content_type: &str) -> String {
    format!("Non-HTML content: {}", content_type)
}

/// Describes a failure to read the body after headers arrived
pub fn describe_read_error(kind: ContentKind, error: impl Display) -> String {
    match kind {
        ContentKind::Json => format!("Error reading JSON body: {}", error),
        _ => format!("Error reading body: {}", error),
    }
}

/// Reads the `Content-Type` header, empty when absent or not valid text
pub fn content_type_of(response: &Response) -> String {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string()
}

/// Classifies a response and produces its display title
///
/// Takes ownership of the response: a body that is read is consumed in
/// full, and the response is released when this function returns on every
/// path, including body read failures.
pub async fn classify_response(response: Response) -> String {
    let content_type = content_type_of(&response);
    let kind = ContentKind::from_content_type(&content_type);

    if !kind.reads_body() {
        return describe_other(&content_type);
    }

    match response.bytes().await {
        Ok(body) => match kind {
            ContentKind::Html => describe_html(&body),
            _ => describe_json(&body),
        },
        Err(e) => {
            tracing::debug!("Failed to read {:?} body: {}", kind, e);
            describe_read_error(kind, e)
        }
    }
}
