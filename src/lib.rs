//! # Movie Finder Telegram Bot
//!
//! A Telegram bot that searches a movie download site for a title, shows the
//! matching download pages as paginated buttons, and resolves a chosen page
//! into its direct download links.

pub mod bot;
pub mod config;
pub mod dialogue;
pub mod expiry;
pub mod link_extraction;
pub mod localization;
pub mod redirect;
pub mod scrape_errors;
pub mod search;
pub mod selection;
pub mod session;
pub mod users;
