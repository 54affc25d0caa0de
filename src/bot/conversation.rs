//! Conversation controller: what each search text or button click does to the
//! chat's state, and what should be shown in reply. Handlers deliver the
//! replies; nothing in here talks to Telegram.

use anyhow::Result;
use std::future::Future;
use tracing::debug;

use crate::dialogue::{search_query, ConversationDialogue, ConversationState};
use crate::scrape_errors::ScrapeError;
use crate::search::{search_movie, SearchOutcome};
use crate::selection::{resolve_selection, ResolvedLink, SelectionOutcome};
use crate::session::{CallbackAction, SearchSession};

use super::BotContext;

/// Reply to a free-text message
#[derive(Debug, Clone, PartialEq)]
pub enum SearchReply {
    /// Blank input; nothing was fetched
    UsageHint,
    NoResults,
    /// The new session, already stored for the chat
    Results(SearchSession),
    Failed(ScrapeError),
}

/// Reply to a callback button click
#[derive(Debug, Clone, PartialEq)]
pub enum CallbackReply {
    /// Show the session's current page
    Page(SearchSession),
    Links(Vec<ResolvedLink>),
    NotAvailable,
    Failed(ScrapeError),
    /// No session, or a token from another search
    Ignored,
}

/// Run a search for `text`.
///
/// `on_search_start` runs once the input is known to be a real query and
/// before any network request.
pub async fn handle_search_text<F, Fut>(
    ctx: &BotContext,
    dialogue: &ConversationDialogue,
    text: Option<&str>,
    on_search_start: F,
) -> Result<SearchReply>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<()>>,
{
    let Some(query) = search_query(text) else {
        return Ok(SearchReply::UsageHint);
    };

    on_search_start().await?;

    match search_movie(&ctx.http, &ctx.scrape_config, query).await {
        Ok(SearchOutcome::NotFound) => {
            dialogue.update(ConversationState::Idle).await?;
            Ok(SearchReply::NoResults)
        }
        Ok(SearchOutcome::Found(candidates)) => {
            let session = SearchSession::with_page_size(candidates, ctx.scrape_config.page_size)
                .with_generation(ctx.next_generation());

            // Replaces any previous search of this chat
            dialogue
                .update(ConversationState::ResultsShown {
                    session: session.clone(),
                })
                .await?;
            Ok(SearchReply::Results(session))
        }
        Err(e) => Ok(SearchReply::Failed(e)),
    }
}

/// Act on the callback data of a clicked button
pub async fn handle_callback_data(
    ctx: &BotContext,
    dialogue: &ConversationDialogue,
    data: &str,
) -> Result<CallbackReply> {
    let Some(ConversationState::ResultsShown { mut session }) = dialogue.get().await? else {
        return Ok(CallbackReply::Ignored);
    };

    match session.interpret(data) {
        CallbackAction::NextPage => {
            if !session.advance_clamped() {
                debug!(page = session.page_index(), "Already on the last page");
            }
            dialogue
                .update(ConversationState::ResultsShown {
                    session: session.clone(),
                })
                .await?;
            Ok(CallbackReply::Page(session))
        }
        CallbackAction::Select(candidate_url) => {
            let outcome = resolve_selection(
                &ctx.http,
                &candidate_url,
                &ctx.scrape_config.download_link_pattern,
            )
            .await;

            Ok(match outcome {
                Ok(SelectionOutcome::Resolved(links)) => CallbackReply::Links(links),
                Ok(SelectionOutcome::NotAvailable) => CallbackReply::NotAvailable,
                Err(e) => CallbackReply::Failed(e),
            })
        }
        CallbackAction::Ignore => Ok(CallbackReply::Ignored),
    }
}
