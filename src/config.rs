//! # Configuration Module
//!
//! This module defines configuration structures for the bot: Telegram
//! credentials and listener settings, plus the scraping parameters for the
//! upstream movie site. Values are read once at startup from the environment.

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

// Constants for scraping configuration
pub const DEFAULT_SITE_BASE_URL: &str = "https://filmyfly.esq";
pub const DEFAULT_SEARCH_LINK_PATTERN: &str = "/page-download/";
pub const DEFAULT_DOWNLOAD_LINK_PATTERN: &str = "https://linkmake.in/view";
pub const DEFAULT_PAGE_SIZE: usize = 8;
pub const DEFAULT_RESULTS_TTL_SECS: u64 = 120;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_WELCOME_PHOTO_URL: &str =
    "https://ik.imagekit.io/dvnhxw9vq/movie_bot.png?updatedAt=1741412177209";
pub const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0 Safari/537.36";

/// Scraping configuration for the upstream site
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Seed URL; redirects from it give the site's current domain
    pub site_base_url: String,
    /// Substring an anchor `href` must contain on a search results page
    pub search_link_pattern: String,
    /// Substring an anchor `href` must contain on a download page
    pub download_link_pattern: String,
    /// Number of candidates per results page
    pub page_size: usize,
    /// How long a results message stays in the chat, in seconds
    pub results_ttl_secs: u64,
    /// Timeout for each HTTP request, in seconds
    pub http_timeout_secs: u64,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            site_base_url: DEFAULT_SITE_BASE_URL.to_string(),
            search_link_pattern: DEFAULT_SEARCH_LINK_PATTERN.to_string(),
            download_link_pattern: DEFAULT_DOWNLOAD_LINK_PATTERN.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            results_ttl_secs: DEFAULT_RESULTS_TTL_SECS,
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }
}

impl ScrapeConfig {
    /// Build a scrape configuration from defaults, overridden by any of
    /// `SITE_BASE_URL`, `SEARCH_LINK_PATTERN`, `DOWNLOAD_LINK_PATTERN`,
    /// `HTTP_TIMEOUT_SECS` and `RESULTS_TTL_SECS`.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Some(base) = non_empty_var("SITE_BASE_URL") {
            config.site_base_url = base;
        }
        if let Some(pattern) = non_empty_var("SEARCH_LINK_PATTERN") {
            config.search_link_pattern = pattern;
        }
        if let Some(pattern) = non_empty_var("DOWNLOAD_LINK_PATTERN") {
            config.download_link_pattern = pattern;
        }
        if let Some(secs) = non_empty_var("HTTP_TIMEOUT_SECS") {
            config.http_timeout_secs = secs
                .parse()
                .with_context(|| format!("HTTP_TIMEOUT_SECS is not a number: {secs}"))?;
        }
        if let Some(secs) = non_empty_var("RESULTS_TTL_SECS") {
            config.results_ttl_secs = secs
                .parse()
                .with_context(|| format!("RESULTS_TTL_SECS is not a number: {secs}"))?;
        }

        Ok(config)
    }

    pub fn results_ttl(&self) -> Duration {
        Duration::from_secs(self.results_ttl_secs)
    }

    /// Build the shared HTTP client used for every scrape
    pub fn http_client(&self) -> Result<reqwest::Client> {
        reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(self.http_timeout_secs))
            .build()
            .context("Failed to build HTTP client")
    }
}

/// Telegram-side configuration
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Bot API token
    pub token: String,
    /// Channel that receives "new user" notices (numeric id or `@username`)
    pub channel_id: Option<String>,
    /// Port the webhook listener binds to
    pub port: u16,
    /// Public base URL for the webhook; polling is used when absent
    pub webhook_url: Option<String>,
    /// Photo sent with the `/start` greeting
    pub welcome_photo_url: String,
}

impl BotConfig {
    pub fn from_env() -> Result<Self> {
        let token = non_empty_var("TELEGRAM_BOT_TOKEN")
            .or_else(|| non_empty_var("BOT_TOKEN"))
            .context("TELEGRAM_BOT_TOKEN must be set")?;

        let port = match non_empty_var("PORT") {
            Some(port) => port
                .parse()
                .with_context(|| format!("PORT is not a valid port number: {port}"))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            token,
            channel_id: non_empty_var("CHANNEL_ID"),
            port,
            webhook_url: non_empty_var("WEBHOOK_URL"),
            welcome_photo_url: non_empty_var("WELCOME_PHOTO_URL")
                .unwrap_or_else(|| DEFAULT_WELCOME_PHOTO_URL.to_string()),
        })
    }

    /// Full webhook endpoint: `{webhook_url}/{token}`
    pub fn webhook_endpoint(&self) -> Option<String> {
        self.webhook_url
            .as_ref()
            .map(|base| format!("{}/{}", base.trim_end_matches('/'), self.token))
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
