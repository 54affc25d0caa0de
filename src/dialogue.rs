//! Conversation dialogue module holding per-chat search state.

use serde::{Deserialize, Serialize};
use teloxide::dispatching::dialogue::{Dialogue, InMemStorage};

use crate::session::SearchSession;

/// Represents the conversation state of a chat
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum ConversationState {
    #[default]
    Idle,
    ResultsShown {
        session: SearchSession,
    },
}

impl ConversationState {
    /// The stored search session, if results are on screen
    pub fn session(&self) -> Option<&SearchSession> {
        match self {
            ConversationState::ResultsShown { session } => Some(session),
            ConversationState::Idle => None,
        }
    }
}

/// Storage backing every conversation's state
pub type ConversationStorage = InMemStorage<ConversationState>;

/// Type alias for our conversation dialogue
pub type ConversationDialogue = Dialogue<ConversationState, ConversationStorage>;

/// Normalise a free-text message into a search query.
///
/// Returns `None` for missing or blank text.
pub fn search_query(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|query| !query.is_empty())
}
