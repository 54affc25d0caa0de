//! # Scrape Error Types Module
//!
//! This module defines the error type shared by the search scraper and the
//! selection resolver. "No results" and "no download link" are normal outcomes
//! and live in the outcome enums of those modules, not here.

/// Failures while fetching or parsing an upstream page
#[derive(Debug, Clone, PartialEq)]
pub enum ScrapeError {
    /// Network failure, timeout or body read failure
    Transport(String),
    /// The upstream site answered with a non-success status
    HttpStatus { status: u16, url: String },
    /// Any other failure (selector construction, malformed input)
    Unexpected(String),
}

impl ScrapeError {
    /// Whether the failure happened while reaching the upstream site
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            ScrapeError::Transport(_) | ScrapeError::HttpStatus { .. }
        )
    }
}

impl std::fmt::Display for ScrapeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScrapeError::Transport(msg) => write!(f, "Transport error: {msg}"),
            ScrapeError::HttpStatus { status, url } => {
                write!(f, "HTTP status {status} for url ({url})")
            }
            ScrapeError::Unexpected(msg) => write!(f, "Unexpected error: {msg}"),
        }
    }
}

impl std::error::Error for ScrapeError {}

impl From<reqwest::Error> for ScrapeError {
    fn from(err: reqwest::Error) -> Self {
        match (err.status(), err.url()) {
            (Some(status), Some(url)) => ScrapeError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            },
            _ => ScrapeError::Transport(err.to_string()),
        }
    }
}
