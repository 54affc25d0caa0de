//! UI Builder module for creating keyboards and formatting messages

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, User};
use tracing::warn;

// Import localization
use crate::localization::{t_args_lang, t_lang};

use crate::scrape_errors::ScrapeError;
use crate::selection::ResolvedLink;
use crate::session::Page;

/// Create the results keyboard: one candidate per row, then "Next" if more follow
pub fn create_results_keyboard(page: &Page<'_>, language_code: Option<&str>) -> InlineKeyboardMarkup {
    let mut buttons: Vec<Vec<InlineKeyboardButton>> = page
        .entries()
        .map(|(token, candidate)| vec![InlineKeyboardButton::callback(candidate.label.clone(), token)])
        .collect();

    if page.has_next {
        buttons.push(vec![InlineKeyboardButton::callback(
            t_lang("next-page", language_code),
            page.next_token(),
        )]);
    }

    InlineKeyboardMarkup::new(buttons)
}

/// Create one outbound URL button per resolved link.
///
/// Links that are not valid URLs are skipped; `None` when nothing remains.
pub fn create_download_keyboard(
    links: &[ResolvedLink],
    language_code: Option<&str>,
) -> Option<InlineKeyboardMarkup> {
    let buttons: Vec<Vec<InlineKeyboardButton>> = links
        .iter()
        .filter_map(|link| match reqwest::Url::parse(&link.url) {
            Ok(url) => Some(vec![InlineKeyboardButton::url(
                t_lang("download-link-button", language_code),
                url,
            )]),
            Err(e) => {
                warn!(url = %link.url, error = %e, "Skipping unparsable download link");
                None
            }
        })
        .collect();

    if buttons.is_empty() {
        None
    } else {
        Some(InlineKeyboardMarkup::new(buttons))
    }
}

/// HTML caption for the `/start` welcome photo
pub fn format_welcome_caption(language_code: Option<&str>) -> String {
    format!(
        "👋 <b>{}</b>\n\n{}\n\n<b>{}</b>\n\n{}",
        t_lang("welcome-title", language_code),
        t_lang("welcome-description", language_code),
        t_lang("welcome-important", language_code),
        t_lang("welcome-spelling", language_code)
    )
}

/// Plain-text notice posted to the notification channel
pub fn format_new_user_notice(user: &User) -> String {
    let name = user.full_name();
    let username = user.username.clone().unwrap_or_default();
    let id = user.id.to_string();

    [
        t_lang("new-user-notice", None),
        t_args_lang("new-user-name", &[("name", &name)], None),
        t_args_lang("new-user-username", &[("username", &username)], None),
        t_args_lang("new-user-id", &[("id", &id)], None),
    ]
    .join("\n")
}

/// User-facing text for a failed scrape
pub fn format_scrape_error(error: &ScrapeError, language_code: Option<&str>) -> String {
    let key = if error.is_fetch_failure() {
        "error-fetch-failed"
    } else {
        "error-unexpected"
    };
    t_args_lang(key, &[("error", &error.to_string())], language_code)
}
