//! Video title resolution
//!
//! Fetches the video page, pulls the `<title>` element and turns it into a
//! filename-safe fragment.

mod sanitize;

pub use sanitize::sanitize;

use std::fmt;

use reqwest::header::USER_AGENT;
use reqwest::StatusCode;

use crate::error::TitleError;

/// Sentinel reported when the page has no title element
pub const TITLE_NOT_FOUND: &str = "Video title not found";

/// Outcome of a title lookup that reached the host.
///
/// Only `Found` carries a real title. The other two are soft failures whose
/// text is still usable as a title placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedTitle {
    Found(String),
    Unavailable(u16),
    Missing,
}

impl ResolvedTitle {
    pub fn is_found(&self) -> bool {
        matches!(self, ResolvedTitle::Found(_))
    }
}

impl fmt::Display for ResolvedTitle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ResolvedTitle::Found(title) => f.write_str(title),
            ResolvedTitle::Unavailable(status) => {
                write!(f, "Request failed (status code: {})", status)
            }
            ResolvedTitle::Missing => f.write_str(TITLE_NOT_FOUND),
        }
    }
}

/// Scrapes and sanitizes video titles
#[derive(Debug, Clone)]
pub struct TitleResolver {
    client: reqwest::Client,
    user_agent: String,
    suffix: String,
}

impl TitleResolver {
    pub fn new(client: reqwest::Client, user_agent: &str, suffix: &str) -> Self {
        Self {
            client,
            user_agent: user_agent.to_string(),
            suffix: suffix.to_string(),
        }
    }

    /// Fetch `url` once and extract its title.
    ///
    /// Transport failures are errors. A non-200 status or a page without a
    /// title is reported through [`ResolvedTitle`].
    pub async fn resolve(&self, url: &str) -> Result<ResolvedTitle, TitleError> {
        let response = self
            .client
            .get(url)
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::warn!(url, status = status.as_u16(), "title page request failed");
            return Ok(ResolvedTitle::Unavailable(status.as_u16()));
        }

        let body = response.text().await?;
        match extract_title(&body, &self.suffix) {
            Some(raw) => Ok(ResolvedTitle::Found(sanitize(&raw))),
            None => {
                tracing::warn!(url, "no title element in page");
                Ok(ResolvedTitle::Missing)
            }
        }
    }
}

/// Extract the text of the first `<title>` element, without the site suffix.
pub fn extract_title(html: &str, suffix: &str) -> Option<String> {
    let caps = regex!(r"(?is)<title\b[^>]*>(.*?)</title\s*>").captures(html)?;
    let text = html_escape::decode_html_entities(&caps[1]);
    let text = text.trim();
    let text = if suffix.is_empty() {
        text
    } else {
        text.strip_suffix(suffix).unwrap_or(text)
    };
    Some(text.trim().to_string())
}
