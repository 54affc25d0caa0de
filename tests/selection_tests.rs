//! # Selection Resolver Tests

mod common;

use common::{closed_port_url, http_client, Route, TestServer};
use moviefinder::config::DEFAULT_DOWNLOAD_LINK_PATTERN;
use moviefinder::scrape_errors::ScrapeError;
use moviefinder::selection::{parse_download_links, resolve_selection, ResolvedLink, SelectionOutcome};

const DOWNLOAD_PAGE: &str = r#"
<html><body>
  <div class="dlbtn"><a href="https://linkmake.in/view/abc">480p</a></div>
  <div class="dlbtn"><a href="https://linkmake.in/view/abc">480p mirror</a></div>
  <div class="dlbtn"><a href="https://linkmake.in/view/xyz">720p</a></div>
  <a href="https://t.me/somechannel">Join</a>
</body></html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    /// Three anchors with one duplicate give exactly two links
    #[test]
    fn test_three_anchors_two_unique_links() {
        match parse_download_links(DOWNLOAD_PAGE, DEFAULT_DOWNLOAD_LINK_PATTERN).unwrap() {
            SelectionOutcome::Resolved(links) => {
                let urls: Vec<&str> = links.iter().map(|link| link.url.as_str()).collect();
                assert_eq!(
                    urls,
                    vec!["https://linkmake.in/view/abc", "https://linkmake.in/view/xyz"]
                );
            }
            SelectionOutcome::NotAvailable => panic!("expected links"),
        }
    }

    #[test]
    fn test_page_without_links_is_not_available() {
        let html = r#"<html><body><p>Coming soon</p><a href="/home">Home</a></body></html>"#;
        assert_eq!(
            parse_download_links(html, DEFAULT_DOWNLOAD_LINK_PATTERN).unwrap(),
            SelectionOutcome::NotAvailable
        );
    }

    #[tokio::test]
    async fn test_resolve_selection_over_http() {
        let server = TestServer::start(vec![(
            "/page-download/5/Inception-2010",
            Route::html(DOWNLOAD_PAGE),
        )])
        .await;

        let outcome = resolve_selection(
            &http_client(),
            &server.url("/page-download/5/Inception-2010"),
            DEFAULT_DOWNLOAD_LINK_PATTERN,
        )
        .await
        .unwrap();

        assert_eq!(
            outcome,
            SelectionOutcome::Resolved(vec![
                ResolvedLink {
                    url: "https://linkmake.in/view/abc".to_string()
                },
                ResolvedLink {
                    url: "https://linkmake.in/view/xyz".to_string()
                },
            ])
        );
    }

    #[tokio::test]
    async fn test_resolve_selection_missing_page() {
        let server = TestServer::start(vec![]).await;

        let result = resolve_selection(
            &http_client(),
            &server.url("/page-download/404/Gone"),
            DEFAULT_DOWNLOAD_LINK_PATTERN,
        )
        .await;

        assert!(matches!(result, Err(ScrapeError::HttpStatus { status: 404, .. })));
    }

    #[tokio::test]
    async fn test_resolve_selection_transport_failure() {
        let url = closed_port_url().await;

        let result = resolve_selection(&http_client(), &url, DEFAULT_DOWNLOAD_LINK_PATTERN).await;

        match result {
            Err(e) => assert!(e.is_fetch_failure()),
            Ok(outcome) => panic!("expected failure, got {outcome:?}"),
        }
    }
}
