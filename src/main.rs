use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::update_listeners::webhooks;
use tracing::info;
use tracing_subscriber::EnvFilter;

use moviefinder::bot::{schema, BotContext};
use moviefinder::config::{BotConfig, ScrapeConfig};
use moviefinder::dialogue::ConversationStorage;
use moviefinder::localization::init_localization;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    init_tracing();

    info!("Starting Movie Finder Telegram Bot");

    init_localization()?;

    let bot_config = BotConfig::from_env()?;
    let scrape_config = ScrapeConfig::from_env()?;
    info!(
        site_base_url = %scrape_config.site_base_url,
        results_ttl_secs = scrape_config.results_ttl_secs,
        "Scrape configuration loaded"
    );

    let bot = Bot::new(&bot_config.token);
    let webhook_endpoint = bot_config.webhook_endpoint();
    let port = bot_config.port;
    let context = Arc::new(BotContext::new(bot_config, scrape_config)?);

    let mut dispatcher = Dispatcher::builder(bot.clone(), schema())
        .dependencies(dptree::deps![ConversationStorage::new(), context])
        .enable_ctrlc_handler()
        .build();

    match webhook_endpoint {
        Some(endpoint) => {
            let url = endpoint
                .parse::<reqwest::Url>()
                .context("WEBHOOK_URL is not a valid URL")?;
            let address = SocketAddr::from(([0, 0, 0, 0], port));
            info!(port, "Bot initialized, listening for webhook updates");

            let listener = webhooks::axum(bot, webhooks::Options::new(address, url))
                .await
                .context("Failed to set up webhook listener")?;
            dispatcher
                .dispatch_with_listener(
                    listener,
                    LoggingErrorHandler::with_custom_text("An error from the update listener"),
                )
                .await;
        }
        None => {
            info!("Bot initialized, starting long polling");
            dispatcher.dispatch().await;
        }
    }

    Ok(())
}

/// Install the tracing subscriber; `LOG_FORMAT=json` selects JSON output
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT").is_ok_and(|format| format.eq_ignore_ascii_case("json"));

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
