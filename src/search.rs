//! # Search Scraper Module
//!
//! Fetches the site's search page for a movie title and turns the matching
//! download-page anchors into [`Candidate`]s.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::ScrapeConfig;
use crate::link_extraction::{absolute_url, fetch_html, label_from_href, unique_matching_hrefs};
use crate::redirect::resolve_redirects;
use crate::scrape_errors::ScrapeError;

/// A download page reference extracted from a search results page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// The href as it appears in the markup; identity of the candidate
    pub href: String,
    /// Button text: last path segment of the href
    pub label: String,
    /// Domain-qualified URL of the download page
    pub absolute_url: String,
}

impl Candidate {
    pub fn new(domain: &str, href: &str) -> Self {
        Self {
            href: href.to_string(),
            label: label_from_href(href),
            absolute_url: absolute_url(domain, href),
        }
    }
}

/// Result of a search that reached the site
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Found(Vec<Candidate>),
    NotFound,
}

/// Build `{domain}site-1.html?to-search={query}` with the query form-encoded.
pub fn build_search_url(domain: &str, query: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(query.as_bytes()).collect();
    let separator = if domain.ends_with('/') { "" } else { "/" };
    format!("{domain}{separator}site-1.html?to-search={encoded}")
}

/// Parse a search results page into candidates
pub fn parse_search_results(
    html: &str,
    domain: &str,
    pattern: &str,
) -> Result<SearchOutcome, ScrapeError> {
    let hrefs = unique_matching_hrefs(html, pattern)?;
    if hrefs.is_empty() {
        return Ok(SearchOutcome::NotFound);
    }

    let candidates = hrefs
        .iter()
        .map(|href| Candidate::new(domain, href))
        .collect();

    Ok(SearchOutcome::Found(candidates))
}

/// Fetch `search_url` and extract the candidates on it
pub async fn search(
    client: &reqwest::Client,
    search_url: &str,
    domain: &str,
    pattern: &str,
) -> Result<SearchOutcome, ScrapeError> {
    debug!(search_url = search_url, "Fetching search results");
    let html = fetch_html(client, search_url).await?;

    let outcome = parse_search_results(&html, domain, pattern)?;
    match &outcome {
        SearchOutcome::Found(candidates) => {
            info!(search_url = search_url, candidates = candidates.len(), "Search returned results")
        }
        SearchOutcome::NotFound => info!(search_url = search_url, "Search returned no results"),
    }

    Ok(outcome)
}

/// Resolve the site's current domain, then search it for `query`
pub async fn search_movie(
    client: &reqwest::Client,
    config: &ScrapeConfig,
    query: &str,
) -> Result<SearchOutcome, ScrapeError> {
    let domain = resolve_redirects(client, &config.site_base_url).await;
    let search_url = build_search_url(&domain, query);
    search(client, &search_url, &domain, &config.search_link_pattern).await
}
