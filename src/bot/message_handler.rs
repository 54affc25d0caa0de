//! Message Handler module for processing incoming Telegram messages

use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::{InputFile, ParseMode, Recipient};
use tracing::{debug, error, info, warn};

// Import localization
use crate::localization::t_lang;

// Import dialogue types
use crate::dialogue::ConversationDialogue;

// Import UI builder functions
use super::conversation::{handle_search_text, SearchReply};
use super::ui_builder::{
    create_results_keyboard, format_new_user_notice, format_scrape_error, format_welcome_caption,
};
use super::BotContext;

/// Handle the `/start` command
pub async fn start_handler(bot: Bot, msg: Message, ctx: Arc<BotContext>) -> Result<()> {
    let language_code = msg
        .from
        .as_ref()
        .and_then(|user| user.language_code.as_deref());

    if let Some(user) = msg.from.as_ref() {
        let first_visit = ctx.users.register(user.id);
        info!(user_id = %user.id, first_visit, known_users = ctx.users.count(), "Received /start command");

        if let Some(channel) = ctx.bot_config.channel_id.as_deref() {
            if let Err(e) = bot
                .send_message(notification_recipient(channel), format_new_user_notice(user))
                .await
            {
                warn!(user_id = %user.id, error = %e, "Failed to post new user notice");
            }
        }
    }

    let caption = format_welcome_caption(language_code);
    match reqwest::Url::parse(&ctx.bot_config.welcome_photo_url) {
        Ok(photo_url) => {
            bot.send_photo(msg.chat.id, InputFile::url(photo_url))
                .caption(caption)
                .parse_mode(ParseMode::Html)
                .await?;
        }
        Err(e) => {
            warn!(error = %e, "Welcome photo url is invalid, sending text only");
            bot.send_message(msg.chat.id, caption)
                .parse_mode(ParseMode::Html)
                .await?;
        }
    }

    Ok(())
}

/// Handle free-text messages: every text is a movie search
pub async fn message_handler(
    bot: Bot,
    msg: Message,
    dialogue: ConversationDialogue,
    ctx: Arc<BotContext>,
) -> Result<()> {
    let language_code = msg
        .from
        .as_ref()
        .and_then(|user| user.language_code.as_deref());

    if msg.text().is_some_and(|text| text.starts_with('/')) {
        debug!(user_id = %msg.chat.id, "Ignoring unknown command");
        return Ok(());
    }

    let chat_id = msg.chat.id;
    let mut searching_message = None;
    let placeholder = &mut searching_message;
    let bot_ref = &bot;

    let reply = handle_search_text(&ctx, &dialogue, msg.text(), move || async move {
        info!(user_id = %chat_id, "Searching for movie");
        let sent = bot_ref
            .send_message(chat_id, t_lang("searching", language_code))
            .await?;
        *placeholder = Some(sent.id);
        Ok::<(), anyhow::Error>(())
    })
    .await;

    // The placeholder goes away whatever the outcome
    if let Some(placeholder_id) = searching_message {
        if let Err(e) = bot.delete_message(chat_id, placeholder_id).await {
            warn!(user_id = %chat_id, error = %e, "Failed to delete searching message");
        }
    }

    match reply? {
        SearchReply::UsageHint => {
            debug!(user_id = %chat_id, "Empty search, sending usage hint");
            bot.send_message(chat_id, t_lang("usage-hint", language_code))
                .await?;
        }
        SearchReply::NoResults => {
            bot.send_message(chat_id, t_lang("no-results", language_code))
                .await?;
        }
        SearchReply::Results(session) => {
            let keyboard = create_results_keyboard(&session.current_page(), language_code);

            let sent_message = bot
                .send_message(chat_id, t_lang("search-results", language_code))
                .reply_markup(keyboard)
                .await?;
            ctx.expiry
                .schedule_deletion(bot.clone(), chat_id, sent_message.id);

            info!(
                user_id = %chat_id,
                candidates = session.candidates().len(),
                generation = session.generation(),
                "Search results sent"
            );
        }
        SearchReply::Failed(e) => {
            error!(user_id = %chat_id, error = %e, "Search failed");
            bot.send_message(chat_id, format_scrape_error(&e, language_code))
                .await?;
        }
    }

    Ok(())
}

/// Channel ids are numeric; anything else is treated as an `@username`
fn notification_recipient(channel: &str) -> Recipient {
    match channel.parse::<i64>() {
        Ok(id) => Recipient::Id(ChatId(id)),
        Err(_) => Recipient::ChannelUsername(channel.to_string()),
    }
}
