//! # Link Extraction Module
//!
//! Shared helpers for both scrapes: fetch a page, collect anchor `href`s that
//! contain a pattern, drop repeats while keeping document order, and turn
//! relative hrefs into absolute URLs and button labels.

use scraper::{Html, Selector};
use std::collections::HashSet;
use tracing::debug;

use crate::scrape_errors::ScrapeError;

/// Fetch `url` and return the body, failing on any non-2xx status
pub async fn fetch_html(client: &reqwest::Client, url: &str) -> Result<String, ScrapeError> {
    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(ScrapeError::HttpStatus {
            status: status.as_u16(),
            url: response.url().to_string(),
        });
    }

    Ok(response.text().await?)
}

/// Collect every anchor `href` containing `pattern`, in document order,
/// keeping only the first occurrence of each exact href.
pub fn unique_matching_hrefs(html: &str, pattern: &str) -> Result<Vec<String>, ScrapeError> {
    let document = Html::parse_document(html);
    let anchor_selector = Selector::parse("a[href]")
        .map_err(|e| ScrapeError::Unexpected(format!("invalid anchor selector: {e:?}")))?;

    let mut seen = HashSet::new();
    let mut hrefs = Vec::new();
    let mut matched = 0usize;

    for href in document
        .select(&anchor_selector)
        .filter_map(|element| element.value().attr("href"))
        .filter(|href| href.contains(pattern))
    {
        matched += 1;
        if seen.insert(href) {
            hrefs.push(href.to_string());
        }
    }

    debug!(
        pattern = pattern,
        matched_anchors = matched,
        unique_links = hrefs.len(),
        "Extracted matching links"
    );

    Ok(hrefs)
}

/// Button label for a candidate: the text after the last `/`.
///
/// Falls back to the last non-empty segment for hrefs ending in `/`, and to
/// the whole href when it has no segments at all.
pub fn label_from_href(href: &str) -> String {
    let last = href.rsplit('/').next().unwrap_or("");
    if !last.is_empty() {
        return last.to_string();
    }

    href.split('/')
        .filter(|segment| !segment.is_empty())
        .next_back()
        .unwrap_or(href)
        .to_string()
}

/// Absolute URL for `href` on `domain`: plain concatenation with a single
/// slash at the seam. Already absolute hrefs are returned unchanged.
pub fn absolute_url(domain: &str, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        return href.to_string();
    }

    match (domain.ends_with('/'), href.starts_with('/')) {
        (true, true) => format!("{}{}", domain, &href[1..]),
        _ => format!("{domain}{href}"),
    }
}
