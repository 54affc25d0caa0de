//! # Selection Resolver Module
//!
//! Fetches a candidate's download page and extracts the final download links.

use tracing::{debug, info};

use crate::link_extraction::{fetch_html, unique_matching_hrefs};
use crate::scrape_errors::ScrapeError;

/// A direct download URL found on a candidate's page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLink {
    pub url: String,
}

/// Result of resolving a selection that reached the site
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionOutcome {
    /// One entry per unique link, in encounter order
    Resolved(Vec<ResolvedLink>),
    NotAvailable,
}

/// Parse a download page into its unique download links
pub fn parse_download_links(html: &str, pattern: &str) -> Result<SelectionOutcome, ScrapeError> {
    let hrefs = unique_matching_hrefs(html, pattern)?;
    if hrefs.is_empty() {
        return Ok(SelectionOutcome::NotAvailable);
    }

    Ok(SelectionOutcome::Resolved(
        hrefs.into_iter().map(|url| ResolvedLink { url }).collect(),
    ))
}

/// Fetch `candidate_url` and extract the download links on it
pub async fn resolve_selection(
    client: &reqwest::Client,
    candidate_url: &str,
    pattern: &str,
) -> Result<SelectionOutcome, ScrapeError> {
    debug!(candidate_url = candidate_url, "Fetching download page");
    let html = fetch_html(client, candidate_url).await?;

    let outcome = parse_download_links(&html, pattern)?;
    if let SelectionOutcome::Resolved(links) = &outcome {
        info!(candidate_url = candidate_url, links = links.len(), "Resolved download links");
    }

    Ok(outcome)
}
