//! Callback Handler module for processing inline keyboard callback queries

use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::{debug, error, info};

// Import localization
use crate::localization::t_lang;

// Import dialogue types
use crate::dialogue::ConversationDialogue;

// Import UI builder functions
use super::conversation::{handle_callback_data, CallbackReply};
use super::ui_builder::{create_download_keyboard, create_results_keyboard, format_scrape_error};
use super::BotContext;

/// Handle callback queries from inline keyboards
pub async fn callback_handler(
    bot: Bot,
    q: CallbackQuery,
    dialogue: ConversationDialogue,
    ctx: Arc<BotContext>,
) -> Result<()> {
    // Acknowledge first so the client stops its loading indicator
    bot.answer_callback_query(q.id.clone()).await?;

    debug!(user_id = %q.from.id, "Received callback query from user");

    let language_code = q.from.language_code.as_deref();
    let data = q.data.as_deref().unwrap_or("");
    let Some(msg) = &q.message else {
        return Ok(());
    };
    let chat_id = msg.chat().id;

    match handle_callback_data(&ctx, &dialogue, data).await? {
        CallbackReply::Page(session) => {
            let keyboard = create_results_keyboard(&session.current_page(), language_code);
            let sent_message = bot
                .send_message(chat_id, t_lang("search-results", language_code))
                .reply_markup(keyboard)
                .await?;
            ctx.expiry
                .schedule_deletion(bot.clone(), chat_id, sent_message.id);

            // The new page supersedes the message that was clicked
            let previous_id = msg.id();
            ctx.expiry.cancel(chat_id, previous_id);
            if let Err(e) = bot.delete_message(chat_id, previous_id).await {
                debug!(user_id = %q.from.id, error = %e, "Superseded results message already gone");
            }
        }
        CallbackReply::Links(links) => {
            info!(user_id = %q.from.id, links = links.len(), "Sending download links");
            match create_download_keyboard(&links, language_code) {
                Some(keyboard) => {
                    bot.send_message(chat_id, t_lang("download-link", language_code))
                        .reply_markup(keyboard)
                        .await?;
                }
                None => {
                    bot.send_message(chat_id, t_lang("download-not-available", language_code))
                        .await?;
                }
            }
        }
        CallbackReply::NotAvailable => {
            bot.send_message(chat_id, t_lang("download-not-available", language_code))
                .await?;
        }
        CallbackReply::Failed(e) => {
            error!(user_id = %q.from.id, error = %e, "Resolving selection failed");
            bot.send_message(chat_id, format_scrape_error(&e, language_code))
                .await?;
        }
        CallbackReply::Ignored => {
            debug!(user_id = %q.from.id, data = data, "Stale or unknown callback, ignoring");
        }
    }

    Ok(())
}
