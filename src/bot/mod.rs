//! Bot module for handling Telegram interactions
//!
//! This module is split into several submodules for better organization:
//! - `conversation`: Decides what a search or button click does to the chat
//! - `message_handler`: Handles `/start` and free-text searches
//! - `callback_handler`: Handles pagination and selection button clicks
//! - `ui_builder`: Creates keyboards and formats messages

pub mod callback_handler;
pub mod conversation;
pub mod message_handler;
pub mod ui_builder;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use anyhow::Result;
use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

use crate::config::{BotConfig, ScrapeConfig};
use crate::dialogue::{ConversationState, ConversationStorage};
use crate::expiry::MessageExpiry;
use crate::users::UserRegistry;

// Re-export main handler functions for use in main.rs
pub use callback_handler::callback_handler;
pub use message_handler::{message_handler, start_handler};

/// Supported commands
#[derive(BotCommands, Clone, Debug)]
#[command(rename_rule = "lowercase")]
pub enum Command {
    /// Show the welcome message
    Start,
}

/// Shared state injected into every handler
pub struct BotContext {
    pub bot_config: BotConfig,
    pub scrape_config: ScrapeConfig,
    pub http: reqwest::Client,
    pub users: UserRegistry,
    pub expiry: Arc<MessageExpiry>,
    generations: AtomicU64,
}

impl BotContext {
    pub fn new(bot_config: BotConfig, scrape_config: ScrapeConfig) -> Result<Self> {
        let http = scrape_config.http_client()?;
        Ok(Self::with_http_client(bot_config, scrape_config, http))
    }

    /// Build a context around an already configured HTTP client
    pub fn with_http_client(
        bot_config: BotConfig,
        scrape_config: ScrapeConfig,
        http: reqwest::Client,
    ) -> Self {
        let expiry = Arc::new(MessageExpiry::new(scrape_config.results_ttl()));

        Self {
            bot_config,
            scrape_config,
            http,
            users: UserRegistry::new(),
            expiry,
            generations: AtomicU64::new(0),
        }
    }

    /// Generation for a new search session; never repeats within a process
    pub fn next_generation(&self) -> u64 {
        self.generations.fetch_add(1, Ordering::Relaxed) + 1
    }
}

/// Dispatcher tree: `/start`, free text, and callback queries
pub fn schema() -> UpdateHandler<anyhow::Error> {
    let message_branch = Update::filter_message()
        .enter_dialogue::<Message, ConversationStorage, ConversationState>()
        .branch(
            dptree::entry()
                .filter_command::<Command>()
                .endpoint(start_handler),
        )
        .branch(dptree::endpoint(message_handler));

    let callback_branch = Update::filter_callback_query()
        .enter_dialogue::<CallbackQuery, ConversationStorage, ConversationState>()
        .endpoint(callback_handler);

    dptree::entry().branch(message_branch).branch(callback_branch)
}
