//! Redirect resolution for the upstream site's moving domain.

use reqwest::StatusCode;
use tracing::{debug, warn};

/// Follow redirects from `seed_url` and return where they land.
///
/// Only a final `200 OK` counts; any other status or a transport failure
/// returns `seed_url` unchanged. One attempt, no retries.
pub async fn resolve_redirects(client: &reqwest::Client, seed_url: &str) -> String {
    match client.get(seed_url).send().await {
        Ok(response) if response.status() == StatusCode::OK => {
            let final_url = response.url().to_string();
            debug!(seed_url = seed_url, final_url = %final_url, "Resolved site domain");
            final_url
        }
        Ok(response) => {
            warn!(
                seed_url = seed_url,
                status = response.status().as_u16(),
                "Domain lookup returned non-200 status, keeping seed url"
            );
            seed_url.to_string()
        }
        Err(e) => {
            warn!(seed_url = seed_url, error = %e, "Domain lookup failed, keeping seed url");
            seed_url.to_string()
        }
    }
}
